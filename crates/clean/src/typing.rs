//! Column type inference
//!
//! Each column is typed once, before imputation, from the cells loaded into
//! the dataset. Typing never re-runs mid-pipeline; the standardization stage
//! coerces stray cells toward the inferred type instead.

use tidyup_formats::Dataset;
use tracing::warn;

/// Inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Text,
}

/// Per-column typing result with untypeable-column warnings
#[derive(Debug, Clone)]
pub struct ColumnTypes {
    pub types: Vec<ColumnType>,
    /// Columns holding both numeric and text cells with no clear numeric
    /// majority; these fall back to text handling.
    pub untypeable: Vec<String>,
}

/// Infer the type of every column
///
/// A column is numeric when strictly more than half of its non-missing
/// cells are numeric. A mixed column without that majority is treated as
/// text and recorded as untypeable. All-missing columns are text.
pub fn infer_column_types(dataset: &Dataset) -> ColumnTypes {
    let mut types = Vec::with_capacity(dataset.column_count());
    let mut untypeable = Vec::new();

    for (idx, name) in dataset.columns().iter().enumerate() {
        let mut numeric = 0usize;
        let mut text = 0usize;
        for cell in dataset.column(idx) {
            if cell.is_missing() {
                continue;
            }
            if cell.is_numeric() {
                numeric += 1;
            } else {
                text += 1;
            }
        }

        let non_missing = numeric + text;
        if non_missing == 0 {
            types.push(ColumnType::Text);
        } else if numeric * 2 > non_missing {
            types.push(ColumnType::Numeric);
        } else {
            if numeric > 0 {
                warn!(column = %name, numeric, text, "mixed column without numeric majority, treating as text");
                untypeable.push(name.clone());
            }
            types.push(ColumnType::Text);
        }
    }

    ColumnTypes { types, untypeable }
}
