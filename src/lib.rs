//! Batch renderer for time-series test logs.
//!
//! Walks a directory tree, loads every `.csv` log with `t`, `input` and
//! `output` columns, and writes a reference vs. output line chart as a PNG
//! into the scanned directory.
//!
//! Module organization:
//! - `data`: log discovery, types and CSV loading
//! - `plot`: chart style, rendering and PNG output
//! - `batch`: the per-directory run and output naming

pub mod batch;
pub mod color;
pub mod data;
pub mod error;
pub mod plot;

pub use batch::{derive_output_path, BatchPlotter, PlotRecord, RunSummary};
pub use error::{ErrorKind, PlotError};
