//! Error types for file organization

use std::path::PathBuf;
use thiserror::Error;

/// File organization errors
///
/// Per-file errors are isolated by the batch driver; one bad file never
/// aborts the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unreadable source {}: {}", .path.display(), .source)]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("destination unwritable {}: {}", .path.display(), .source)]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for organization operations
pub type Result<T> = std::result::Result<T, Error>;
