//! Cell standardization
//!
//! Normalizes text and numeric representations so that equal values compare
//! equal during duplicate removal. Standardizing an already-standardized
//! dataset changes nothing.

use crate::typing::ColumnType;
use crate::Result;
use tidyup_formats::{Cell, Dataset};
use tracing::debug;

/// Standardization configuration
#[derive(Debug, Clone)]
pub struct Standardizer {
    /// Trim leading/trailing whitespace from text cells
    pub trim_whitespace: bool,
    /// Lowercase text cells
    pub lowercase: bool,
}

impl Standardizer {
    pub fn new(trim_whitespace: bool, lowercase: bool) -> Self {
        Self {
            trim_whitespace,
            lowercase,
        }
    }

    /// Preset that keeps original casing
    pub fn raw_case() -> Self {
        Self {
            trim_whitespace: true,
            lowercase: false,
        }
    }

    /// Normalize a single text value
    pub fn normalize_text(&self, text: &str) -> String {
        let mut result = if self.trim_whitespace {
            text.trim().to_string()
        } else {
            text.to_string()
        };
        if self.lowercase {
            result = result.to_lowercase();
        }
        result
    }

    /// Standardize every cell toward its column's inferred type
    ///
    /// Text columns: trim and case-normalize; stray numeric cells take their
    /// canonical text form. Numeric columns: stray text cells are parsed
    /// after trimming, and unparseable residue becomes missing; the caller
    /// re-runs imputation for those cells.
    pub fn standardize(&self, dataset: &Dataset, types: &[ColumnType]) -> Result<StandardizeOutcome> {
        if dataset.is_empty() {
            return Ok(StandardizeOutcome {
                dataset: dataset.clone(),
                new_missing: 0,
            });
        }

        let mut new_missing = 0usize;
        let rows = dataset
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(idx, cell)| match types[idx] {
                        ColumnType::Numeric => self.coerce_numeric(cell, &mut new_missing),
                        ColumnType::Text => self.coerce_text(cell),
                    })
                    .collect()
            })
            .collect();

        if new_missing > 0 {
            debug!(new_missing, "standardization uncovered unparseable numeric residue");
        }

        let dataset = Dataset::new(dataset.columns().to_vec(), rows)?;
        Ok(StandardizeOutcome {
            dataset,
            new_missing,
        })
    }

    fn coerce_numeric(&self, cell: &Cell, new_missing: &mut usize) -> Cell {
        match cell {
            Cell::Numeric(v) => Cell::Numeric(*v),
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(v) => Cell::Numeric(v),
                Err(_) => {
                    *new_missing += 1;
                    Cell::Missing
                }
            },
            Cell::Missing => Cell::Missing,
        }
    }

    fn coerce_text(&self, cell: &Cell) -> Cell {
        match cell {
            Cell::Text(s) => Cell::Text(self.normalize_text(s)),
            Cell::Numeric(v) => Cell::Text(self.normalize_text(&Cell::Numeric(*v).canonical())),
            Cell::Missing => Cell::Missing,
        }
    }
}

impl Default for Standardizer {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
            lowercase: true,
        }
    }
}

/// Result of a standardization pass
#[derive(Debug)]
pub struct StandardizeOutcome {
    pub dataset: Dataset,
    /// Cells in numeric columns that turned out unparseable
    pub new_missing: usize,
}
