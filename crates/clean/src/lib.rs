//! Deterministic cleaning pipeline for tabular datasets
//!
//! This crate provides the column typing, missing-value imputation,
//! standardization, and stable duplicate-removal stages, plus the pipeline
//! that runs them in fixed order and reports what changed.

pub mod dedup;
pub mod error;
pub mod impute;
pub mod pipeline;
pub mod standardize;
pub mod typing;

pub use error::{Error, Result};
pub use pipeline::{CleanConfig, CleaningPipeline, CleaningPipelineBuilder, CleaningReport};
pub use standardize::Standardizer;
pub use typing::{infer_column_types, ColumnType};
