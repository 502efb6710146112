use std::path::PathBuf;

use anyhow::{Context, Result};
use batch_plotter::BatchPlotter;
use clap::Parser;

/// Render a reference vs. output chart for every CSV log below a directory.
#[derive(Parser)]
#[command(name = "batch-plotter")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory to scan recursively for *.csv files
    root: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    BatchPlotter::new(&cli.root)
        .run()
        .with_context(|| format!("plotting logs under {}", cli.root.display()))?;
    Ok(())
}
