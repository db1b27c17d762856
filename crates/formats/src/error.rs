//! Error types for dataset readers and writers

use thiserror::Error;

/// Dataset format errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed dataset: {0}")]
    Malformed(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    ColumnMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, Error>;
