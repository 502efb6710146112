use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use super::model::{Dataset, Sample};
use crate::error::PlotError;

/// Columns every log file must provide, in `Sample` field order.
pub const REQUIRED_COLUMNS: [&str; 3] = ["t", "input", "output"];

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a time-series log from a CSV file.
///
/// CSV layout: header row with column names, one sample per row.
/// `t`, `input` and `output` must be present; every other column is ignored.
/// An empty cell loads as `NaN`.
pub fn load_csv(path: &Path) -> Result<Dataset, PlotError> {
    let csv_err = |source| PlotError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let indices = column_indices(&headers, path)?;

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let mut values = [0.0; 3];
        for (slot, (&idx, column)) in values
            .iter_mut()
            .zip(indices.iter().zip(REQUIRED_COLUMNS))
        {
            *slot = parse_cell(record.get(idx).unwrap_or(""), path, line, column)?;
        }

        samples.push(Sample {
            t: values[0],
            input: values[1],
            output: values[2],
        });
    }

    debug!("Loaded {} samples from {}", samples.len(), path.display());
    Ok(Dataset::from_samples(samples))
}

fn column_indices(headers: &StringRecord, path: &Path) -> Result<[usize; 3], PlotError> {
    let mut indices = [0; 3];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| PlotError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })?;
    }
    Ok(indices)
}

fn parse_cell(raw: &str, path: &Path, line: u64, column: &'static str) -> Result<f64, PlotError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse::<f64>().map_err(|_| PlotError::InvalidValue {
        path: path.to_path_buf(),
        line,
        column,
        value: raw.to_string(),
    })
}
