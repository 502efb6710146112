//! Chart rendering: style, drawing backend, pixel canvas and the chart itself.

pub mod backend;
pub mod canvas;
pub mod chart;
pub mod style;

pub use canvas::{write_png, Canvas};
pub use chart::{axis_range, draw_chart, render_dataset};
pub use style::PlotStyle;
