//! Error types for the cleaning pipeline

use thiserror::Error;

/// Cleaning pipeline errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Format error: {0}")]
    Format(#[from] tidyup_formats::Error),
}

/// Result type alias for cleaning operations
pub type Result<T> = std::result::Result<T, Error>;
