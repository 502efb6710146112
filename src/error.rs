use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`PlotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The scanned root is missing, not a directory, or unreadable.
    FileSystem,
    /// A source file cannot be parsed into a dataset.
    DataFormat,
    /// An output image cannot be written.
    Io,
    /// Drawing the chart failed.
    Render,
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot scan directory {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: line {line}, column '{column}': '{value}' is not a number", .path.display())]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("failed to render plot: {0}")]
    Render(String),
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}

impl PlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlotError::FileSystem { .. } => ErrorKind::FileSystem,
            PlotError::MissingColumn { .. }
            | PlotError::Csv { .. }
            | PlotError::InvalidValue { .. } => ErrorKind::DataFormat,
            PlotError::Render(_) => ErrorKind::Render,
            PlotError::Io { .. } | PlotError::Encode { .. } => ErrorKind::Io,
        }
    }
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(format!("{value:?}"))
    }
}
