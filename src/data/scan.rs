//! Recursive discovery of log files below a root directory.
//!
//! The walk is top-down and deterministic: entries of each directory are
//! visited in file-name order, files before subdirectories. Symlinked
//! directories are not followed; dangling `.csv` symlinks are listed so that
//! loading them reports the broken file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::PlotError;

/// File-name suffix selecting a log file (case-sensitive).
pub const CSV_SUFFIX: &str = ".csv";

/// Check if a file name selects a log file.
///
/// Matches on the raw name bytes, so names that are not valid UTF-8 still
/// count.
pub fn is_csv_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.as_encoded_bytes().ends_with(CSV_SUFFIX.as_bytes()))
        .unwrap_or(false)
}

/// Collect every `.csv` file below `root`.
///
/// The full list is built before returning so callers can write into the
/// scanned tree without the walk picking up their output.
pub fn find_csv_files(root: &Path) -> Result<Vec<PathBuf>, PlotError> {
    let fs_err = |source| PlotError::FileSystem {
        path: root.to_path_buf(),
        source,
    };

    let meta = fs::metadata(root).map_err(fs_err)?;
    if !meta.is_dir() {
        return Err(fs_err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "not a directory",
        )));
    }

    let entries = sorted_entries(root).map_err(fs_err)?;
    let mut found = Vec::new();
    walk(entries, &mut found);

    debug!("Found {} CSV files under {}", found.len(), root.display());
    Ok(found)
}

fn walk(entries: Vec<PathBuf>, found: &mut Vec<PathBuf>) {
    let mut subdirs = Vec::new();

    for path in entries {
        let is_link = fs::symlink_metadata(&path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        if path.is_dir() {
            if is_link {
                debug!("Not following symlinked directory {}", path.display());
            } else {
                subdirs.push(path);
            }
        } else if is_csv_file(&path) {
            if path.is_file() {
                found.push(path);
            } else if is_link && !path.exists() {
                warn!("{} is a dangling symlink", path.display());
                found.push(path);
            }
        }
    }

    for dir in subdirs {
        match sorted_entries(&dir) {
            Ok(entries) => walk(entries, found),
            Err(e) => warn!("Skipping unreadable directory {}: {}", dir.display(), e),
        }
    }
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .collect::<Vec<_>>();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
