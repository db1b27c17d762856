//! In-memory dataset representation
//!
//! A dataset is an ordered list of named columns and a list of rows, with
//! every row holding exactly one cell per column. The constructors enforce
//! the width invariant so pipeline stages can index cells positionally.

use crate::{Cell, Error, Result};

/// An ordered, rectangular table of typed cells
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Create a dataset, validating that every row matches the column count
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let expected = columns.len();
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(Error::ColumnMismatch {
                    row: idx + 1,
                    found: row.len(),
                    expected,
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// A dataset with no columns and no rows
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Column names in original order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in original order
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when there is nothing to process (no rows or no columns)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Iterate the cells of one column, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Total count of missing cells across the dataset
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|c| c.is_missing()).count())
            .sum()
    }

    /// Consume the dataset, returning columns and rows
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Cell>>) {
        (self.columns, self.rows)
    }
}
