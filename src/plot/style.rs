use plotters::style::RGBColor;

use crate::color;

/// Fixed look of every chart. Sizes are physical (inches, points) and turned
/// into pixels at `dpi`.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    /// Padding kept around the content when cropping to the tight bbox.
    pub pad_in: f64,
    pub line_width_pt: f64,
    pub grid_alpha: f64,
    pub title_pt: f64,
    pub label_pt: f64,
    pub tick_pt: f64,
    pub legend_pt: f64,
    pub font_family: &'static str,
    pub background: RGBColor,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub reference_label: &'static str,
    pub output_label: &'static str,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 6.0,
            dpi: 300,
            pad_in: 0.1,
            line_width_pt: 2.0,
            grid_alpha: 0.3,
            title_pt: 12.0,
            label_pt: 10.0,
            tick_pt: 10.0,
            legend_pt: 10.0,
            font_family: "sans-serif",
            background: RGBColor(255, 255, 255),
            x_label: "Tempo (s)",
            y_label: "Amplitude",
            reference_label: "Referência",
            output_label: "Saída",
        }
    }
}

impl PlotStyle {
    /// Canvas size in pixels before cropping.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.inches(self.width_in), self.inches(self.height_in))
    }

    pub fn inches(&self, value: f64) -> u32 {
        (value * self.dpi as f64).round() as u32
    }

    /// Points (1/72 inch) to pixels.
    pub fn points(&self, value: f64) -> u32 {
        (value * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }

    pub fn reference_color(&self) -> RGBColor {
        color::series_color(0)
    }

    pub fn output_color(&self) -> RGBColor {
        color::series_color(1)
    }

    pub fn grid_color(&self) -> RGBColor {
        color::hex_color(color::GRID_HEX)
    }
}
