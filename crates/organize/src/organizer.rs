//! Batch directory organization
//!
//! Iterates the plain files of a directory, classifies and moves each one,
//! and folds the results into an [`OrganizationReport`]. Per-file errors
//! are isolated: one bad file never aborts the batch.

use crate::category::ExtensionTable;
use crate::mover::classify_and_move;
use crate::report::OrganizationReport;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// List the plain files of a directory, sorted by name
///
/// Sorting keeps collision suffixes deterministic across runs; `read_dir`
/// order is filesystem-dependent.
fn files_in(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(Error::NotADirectory(directory.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Preview classification without touching the filesystem
///
/// Returns each file with the category it would move into.
pub fn plan_directory(
    directory: &Path,
    table: &ExtensionTable,
) -> Result<Vec<(PathBuf, String)>> {
    Ok(files_in(directory)?
        .into_iter()
        .map(|path| {
            let category = table.classify_path(&path).to_string();
            (path, category)
        })
        .collect())
}

/// Organize every file of `directory` into category folders under
/// `destination_root`
pub fn organize_directory(
    directory: &Path,
    table: &ExtensionTable,
    destination_root: &Path,
) -> Result<OrganizationReport> {
    let files = files_in(directory)?;
    info!(directory = %directory.display(), files = files.len(), "starting organization");

    let mut report = OrganizationReport::new();
    for path in files {
        match classify_and_move(&path, table, destination_root) {
            Ok(outcome) => report.record(outcome),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to move file");
                report.record_failure(path, e.to_string());
            }
        }
    }

    info!(
        moved = report.total_moved(),
        failed = report.total_failed(),
        "organization complete"
    );
    Ok(report)
}
