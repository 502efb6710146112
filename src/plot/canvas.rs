use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{imageops, RgbImage};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::backend::TextTolerantBackend;
use crate::error::PlotError;

/// Drawing area over a canvas buffer.
pub type CanvasArea<'a> = DrawingArea<TextTolerantBackend<BitMapBackend<'a>>, Shift>;

/// Owned RGB pixel buffer a chart is drawn into.
///
/// The buffer lives exactly as long as the `Canvas`; drawing areas borrow it
/// and cannot outlive it, so it is released on every path out of a render.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 3],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Borrow the buffer as a plotters drawing area.
    pub fn drawing_area(&mut self) -> CanvasArea<'_> {
        let size = (self.width, self.height);
        TextTolerantBackend::new(BitMapBackend::with_buffer(&mut self.pixels, size))
            .into_drawing_area()
    }

    /// Smallest `(x, y, width, height)` rectangle containing every pixel that
    /// differs from `background`, or `None` for a blank canvas.
    pub fn content_bounds(&self, background: RGBColor) -> Option<(u32, u32, u32, u32)> {
        let bg = [background.0, background.1, background.2];
        let mut bounds: Option<(u32, u32, u32, u32)> = None;

        for (i, px) in self.pixels.chunks_exact(3).enumerate() {
            if px == bg {
                continue;
            }
            let x = (i % self.width as usize) as u32;
            let y = (i / self.width as usize) as u32;
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }

        bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
    }

    /// Consume the canvas and return it cropped to its content plus `pad`
    /// pixels on each side (clamped to the canvas). A blank canvas is kept
    /// whole.
    pub fn into_tight_image(
        self,
        background: RGBColor,
        pad: u32,
    ) -> Result<RgbImage, PlotError> {
        let bounds = self.content_bounds(background);
        let (width, height) = self.size();
        let image = RgbImage::from_raw(width, height, self.pixels)
            .ok_or_else(|| PlotError::Render("failed to allocate image buffer".into()))?;

        let Some((x, y, w, h)) = bounds else {
            return Ok(image);
        };
        let x0 = x.saturating_sub(pad);
        let y0 = y.saturating_sub(pad);
        let x1 = (x + w + pad).min(width);
        let y1 = (y + h + pad).min(height);
        debug!(
            "Cropping {width}x{height} canvas to {}x{} at ({x0}, {y0})",
            x1 - x0,
            y1 - y0
        );

        Ok(imageops::crop_imm(&image, x0, y0, x1 - x0, y1 - y0).to_image())
    }
}

/// Encode `image` as an 8-bit RGB PNG at `path`, declaring `dpi` in the
/// `pHYs` chunk.
pub fn write_png(image: &RgbImage, path: &Path, dpi: u32) -> Result<(), PlotError> {
    let io_err = |source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    };
    let encode_err = |source| PlotError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = (dpi as f64 / 0.0254).round() as u32;
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header().map_err(encode_err)?;
    writer.write_image_data(image.as_raw()).map_err(encode_err)?;
    writer.finish().map_err(encode_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BG: RGBColor = RGBColor(255, 255, 255);

    fn blank(width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        canvas.drawing_area().fill(&BG).unwrap();
        canvas
    }

    #[test]
    fn blank_canvas_has_no_content() {
        let canvas = blank(40, 30);
        assert_eq!(canvas.content_bounds(BG), None);

        let image = canvas.into_tight_image(BG, 5).unwrap();
        assert_eq!(image.dimensions(), (40, 30));
    }

    #[test]
    fn crops_to_content_with_padding() {
        let mut canvas = blank(100, 80);
        {
            let area = canvas.drawing_area();
            area.draw_pixel((20, 30), &BLACK).unwrap();
            area.draw_pixel((39, 44), &BLACK).unwrap();
            area.present().unwrap();
        }
        assert_eq!(canvas.content_bounds(BG), Some((20, 30, 20, 15)));

        let image = canvas.into_tight_image(BG, 5).unwrap();
        assert_eq!(image.dimensions(), (30, 25));
        assert_eq!(image.get_pixel(5, 5).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(24, 19).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn padding_is_clamped_to_canvas() {
        let mut canvas = blank(50, 50);
        {
            let area = canvas.drawing_area();
            area.draw_pixel((1, 48), &BLACK).unwrap();
            area.present().unwrap();
        }
        let image = canvas.into_tight_image(BG, 10).unwrap();
        assert_eq!(image.dimensions(), (12, 12));
    }

    #[test]
    fn png_declares_dpi() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        let image = RgbImage::from_pixel(8, 4, image::Rgb([10, 20, 30]));

        write_png(&image, &path, 300).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (8, 4));
        let dims = info.pixel_dims.expect("pHYs chunk");
        assert_eq!(dims.xppu, 11811);
        assert_eq!(dims.unit, png::Unit::Meter);
    }

    #[test]
    fn write_into_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let image = RgbImage::new(2, 2);

        let err = write_png(&image, &path, 300).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
