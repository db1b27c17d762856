//! Collision-safe file relocation
//!
//! Moves one file into `destination_root/<category>`, creating the category
//! directory on demand and resolving name collisions with numeric suffixes.
//! Nothing is recorded on failure; the error surfaces to the caller.

use crate::category::ExtensionTable;
use crate::report::MoveOutcome;
use crate::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Destination file name with a lowercased extension
///
/// Only the extension is normalized; the stem keeps its original casing.
/// `report.PDF` therefore lands as `report.pdf` and collides with an
/// existing `report.pdf` instead of silently coexisting with it.
fn destination_name(source: &Path) -> Option<String> {
    let stem = source.file_stem()?.to_str()?;
    match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => Some(format!("{stem}.{}", ext.to_lowercase())),
        None => Some(stem.to_string()),
    }
}

/// First free path for `file_name` inside `directory`
///
/// A taken name gets `_1`, `_2`, … appended before the extension until a
/// free name is found. Each increment tries a name not yet probed, so the
/// search terminates in any finite directory.
pub fn unique_destination(directory: &Path, file_name: &str) -> PathBuf {
    let candidate = directory.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let extension = name.extension().and_then(|e| e.to_str());

    let mut suffix = 1usize;
    loop {
        let next = match extension {
            Some(ext) => directory.join(format!("{stem}_{suffix}.{ext}")),
            None => directory.join(format!("{stem}_{suffix}")),
        };
        if !next.exists() {
            return next;
        }
        suffix += 1;
    }
}

/// Relocate a file, falling back to copy+remove across filesystems
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        // rename cannot cross mount points; retry as copy + remove
        Err(_) if source.exists() => {
            fs::copy(source, destination)?;
            fs::remove_file(source)?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Classify a file and move it into its category directory
///
/// The category directory is created idempotently. On any failure the
/// filesystem is left without a partially-moved file; an already-created
/// empty category directory is tolerated.
pub fn classify_and_move(
    source: &Path,
    table: &ExtensionTable,
    destination_root: &Path,
) -> Result<MoveOutcome> {
    let metadata = fs::metadata(source).map_err(|e| Error::UnreadableSource {
        path: source.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_file() {
        return Err(Error::UnreadableSource {
            path: source.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    let category = table.classify_path(source).to_string();
    let target_dir = destination_root.join(&category);
    fs::create_dir_all(&target_dir).map_err(|e| Error::DestinationUnwritable {
        path: target_dir.clone(),
        source: e,
    })?;

    let file_name = destination_name(source).ok_or_else(|| Error::UnreadableSource {
        path: source.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, "unrepresentable file name"),
    })?;
    let destination = unique_destination(&target_dir, &file_name);
    let renamed = destination.file_name().and_then(|n| n.to_str()) != Some(file_name.as_str());
    if renamed {
        debug!(source = %source.display(), destination = %destination.display(), "collision resolved with suffix");
    }

    move_file(source, &destination).map_err(|e| {
        if source.exists() {
            Error::DestinationUnwritable {
                path: destination.clone(),
                source: e,
            }
        } else {
            Error::UnreadableSource {
                path: source.to_path_buf(),
                source: e,
            }
        }
    })?;

    info!(
        source = %source.display(),
        destination = %destination.display(),
        category = %category,
        "moved file"
    );

    Ok(MoveOutcome {
        source: source.to_path_buf(),
        destination,
        category,
        renamed,
    })
}
