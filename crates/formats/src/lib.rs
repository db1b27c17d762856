//! Tabular dataset model and delimited file I/O
//!
//! This crate provides the in-memory row/column representation shared by
//! the cleaning pipeline and streaming readers/writers for delimited files.

pub mod cell;
pub mod delimited;
pub mod error;
pub mod table;
pub mod writer;

pub use cell::{default_null_markers, parse_cell, Cell};
pub use delimited::{DelimitedConfig, DelimitedReader};
pub use error::{Error, Result};
pub use table::Dataset;
pub use writer::write_dataset;
