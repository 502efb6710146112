use std::path::{Path, PathBuf};

use log::info;

use crate::data::loader::load_csv;
use crate::data::scan::{find_csv_files, CSV_SUFFIX};
use crate::error::PlotError;
use crate::plot::{render_dataset, write_png, PlotStyle};

// ---------------------------------------------------------------------------
// Output naming
// ---------------------------------------------------------------------------

/// Image path for a source log: `{root}/plot_{name}.png`, where `name` is the
/// source file name with every `.csv` removed.
///
/// Only the file name is used, so logs sharing a name in different
/// subdirectories map to the same image and the later one wins.
pub fn derive_output_path(root: &Path, source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().replace(CSV_SUFFIX, ""))
        .unwrap_or_default();
    root.join(format!("plot_{name}.png"))
}

// ---------------------------------------------------------------------------
// BatchPlotter
// ---------------------------------------------------------------------------

/// One source log and the image written for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRecord {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Images written by a completed run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub plots: Vec<PlotRecord>,
}

impl RunSummary {
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }
}

/// Renders a chart for every `.csv` log below a root directory.
pub struct BatchPlotter {
    root: PathBuf,
    style: PlotStyle,
}

impl BatchPlotter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            style: PlotStyle::default(),
        }
    }

    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Plot every log below the root.
    ///
    /// The file list is collected before the first image is written. The
    /// first error aborts the run; images already written are kept.
    pub fn run(&self) -> Result<RunSummary, PlotError> {
        let sources = find_csv_files(&self.root)?;

        let mut summary = RunSummary::default();
        for source in sources {
            let output = self.plot_file(&source)?;
            summary.plots.push(PlotRecord { source, output });
        }

        info!("Wrote {} plots into {}", summary.len(), self.root.display());
        Ok(summary)
    }

    /// Load, render and save one log, printing progress to stdout.
    pub fn plot_file(&self, source: &Path) -> Result<PathBuf, PlotError> {
        println!("Processing: {}", source.display());

        let dataset = load_csv(source)?;
        let title = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let image = render_dataset(&dataset, &title, &self.style)?;

        let output = derive_output_path(&self.root, source);
        write_png(&image, &output, self.style.dpi)?;

        println!("Saved plot: {}", output.display());
        Ok(output)
    }
}
