use std::str::FromStr;

use palette::Srgb;
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Categorical cycle used for chart series, in draw order.
const SERIES_HEX: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"];

/// Major grid line colour (drawn with the style's grid alpha).
pub const GRID_HEX: &str = "#b0b0b0";

/// Parse a `#rrggbb` string into a plotters colour. Falls back to black.
pub fn hex_color(hex: &str) -> RGBColor {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => RGBColor(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("Invalid colour {hex:?}: {e}");
            RGBColor(0, 0, 0)
        }
    }
}

/// Colour of the `index`-th series; wraps around the cycle.
pub fn series_color(index: usize) -> RGBColor {
    hex_color(SERIES_HEX[index % SERIES_HEX.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_and_output_colours_differ() {
        assert_eq!(series_color(0), RGBColor(0x1f, 0x77, 0xb4));
        assert_eq!(series_color(1), RGBColor(0xff, 0x7f, 0x0e));
        assert_eq!(series_color(SERIES_HEX.len()), series_color(0));
    }

    #[test]
    fn invalid_hex_falls_back_to_black() {
        assert_eq!(hex_color("nope"), RGBColor(0, 0, 0));
        assert_eq!(hex_color(GRID_HEX), RGBColor(0xb0, 0xb0, 0xb0));
    }
}
