use image::RgbImage;
use log::debug;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::canvas::Canvas;
use super::style::PlotStyle;
use crate::data::model::{Dataset, Signal};
use crate::error::PlotError;

/// Fraction of the data span added on both sides of each axis.
const AXIS_MARGIN: f64 = 0.05;

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Render the reference/output chart of `dataset` and crop it to its content.
pub fn render_dataset(
    dataset: &Dataset,
    title: &str,
    style: &PlotStyle,
) -> Result<RgbImage, PlotError> {
    let (width, height) = style.canvas_size();
    let mut canvas = Canvas::new(width, height);
    {
        let root = canvas.drawing_area();
        draw_chart(&root, dataset, title, style)?;
        root.present()?;
    }
    canvas.into_tight_image(style.background, style.inches(style.pad_in))
}

/// Draw the two-line comparison chart onto any drawing area.
pub fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    title: &str,
    style: &PlotStyle,
) -> Result<(), PlotError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&style.background)?;

    let (x_min, x_max) = axis_range(dataset.t_bounds());
    let (y_min, y_max) = axis_range(dataset.value_bounds());
    debug!(
        "Chart {title:?}: {} samples, x {x_min:.3}..{x_max:.3}, y {y_min:.3}..{y_max:.3}",
        dataset.len()
    );

    let text = |pt: f64| (style.font_family, style.points(pt) as f64).into_font();
    let thin = style.points(0.8);

    let mut chart = ChartBuilder::on(root)
        .margin(style.inches(0.1))
        .caption(title, text(style.title_pt))
        .set_label_area_size(LabelAreaPosition::Left, style.inches(0.9))
        .set_label_area_size(LabelAreaPosition::Bottom, style.inches(0.7))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(style.grid_color().mix(style.grid_alpha).stroke_width(thin))
        .axis_style(BLACK.stroke_width(thin))
        .x_desc(style.x_label)
        .y_desc(style.y_label)
        .label_style(text(style.tick_pt))
        .axis_desc_style(text(style.label_pt))
        .draw()?;

    let line_width = style.points(style.line_width_pt);
    let swatch = style.points(20.0) as i32;
    draw_signal(
        &mut chart,
        dataset,
        Signal::Input,
        style.reference_label,
        style.reference_color().stroke_width(line_width),
        swatch,
    )?;
    draw_signal(
        &mut chart,
        dataset,
        Signal::Output,
        style.output_label,
        style.output_color().stroke_width(line_width),
        swatch,
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .legend_area_size(swatch as u32 + style.points(6.0))
        .margin(style.points(5.0))
        .label_font(text(style.legend_pt))
        .background_style(style.background.mix(0.8))
        .border_style(BLACK.mix(0.2).stroke_width(thin))
        .draw()?;

    Ok(())
}

fn draw_signal<DB>(
    chart: &mut Chart<'_, DB>,
    dataset: &Dataset,
    signal: Signal,
    label: &str,
    line: ShapeStyle,
    swatch: i32,
) -> Result<(), PlotError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut segments = dataset.segments(signal).into_iter();

    // The first segment carries the legend entry, even when it is empty.
    let first = segments.next().unwrap_or_default();
    chart
        .draw_series(LineSeries::new(first, line))?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + swatch, y)], line));

    for segment in segments {
        chart.draw_series(LineSeries::new(segment, line))?;
    }
    Ok(())
}

/// Axis range for finite data bounds, widened by [`AXIS_MARGIN`].
///
/// No data gives `0..1`; a single value gets a unit-wide range around it.
/// The span always fits in an `f64`: a margin that would overflow is dropped
/// on that side, and if the span still overflows the axis becomes a window
/// of width `f64::MAX` centred on the data.
pub fn axis_range(bounds: Option<(f64, f64)>) -> (f64, f64) {
    let (lo, hi, pad) = match bounds {
        None => return (0.0, 1.0),
        Some((lo, hi)) if hi <= lo => (lo, hi, 0.5_f64.max(lo.abs() * AXIS_MARGIN)),
        // Scale before subtracting; `hi - lo` overflows near the f64 limits.
        Some((lo, hi)) => (lo, hi, hi * AXIS_MARGIN - lo * AXIS_MARGIN),
    };

    let start = Some(lo - pad).filter(|v| v.is_finite()).unwrap_or(lo);
    let end = Some(hi + pad).filter(|v| v.is_finite()).unwrap_or(hi);
    if (end - start).is_finite() {
        return (start, end);
    }

    // Only reachable with lo < 0 < hi, so `mid` is within f64::MAX / 2.
    let mid = lo / 2.0 + hi / 2.0;
    (mid - f64::MAX / 2.0, mid + f64::MAX / 2.0)
}
