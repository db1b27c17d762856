//! Missing-value imputation
//!
//! Fills missing cells per column according to the inferred column type.
//! Row count is never changed by this stage.

use crate::typing::ColumnType;
use crate::Result;
use ahash::AHashMap;
use tidyup_formats::{Cell, Dataset};
use tracing::debug;

/// Result of an imputation pass
#[derive(Debug)]
pub struct ImputeOutcome {
    pub dataset: Dataset,
    /// Number of cells that were filled
    pub cells_filled: usize,
}

/// Mean of the non-missing numeric values in a column
///
/// IEEE-754 f64 sum-then-divide, no rounding. An all-missing column
/// yields 0.0.
pub fn column_mean(dataset: &Dataset, index: usize) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for cell in dataset.column(index) {
        if let Some(v) = cell.as_f64() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Most frequent non-missing value in a column
///
/// Ties are broken by first appearance in row order; returns `None` when
/// the column has no non-missing cells.
pub fn column_mode(dataset: &Dataset, index: usize) -> Option<Cell> {
    let mut counts: AHashMap<String, usize> = AHashMap::new();
    let mut order: Vec<(String, Cell)> = Vec::new();

    for cell in dataset.column(index) {
        if cell.is_missing() {
            continue;
        }
        let key = cell.canonical();
        let entry = counts.entry(key.clone()).or_insert(0);
        if *entry == 0 {
            order.push((key, cell.clone()));
        }
        *entry += 1;
    }

    // Strictly-greater comparison keeps the first-seen value on ties.
    let mut best: Option<(usize, Cell)> = None;
    for (key, cell) in order {
        let count = counts[&key];
        let better = match &best {
            None => true,
            Some((current, _)) => count > *current,
        };
        if better {
            best = Some((count, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

/// Fill missing cells column by column
///
/// Numeric columns take the column mean (0.0 when every cell is missing);
/// text columns take the column mode, or `placeholder` when no mode exists.
pub fn impute_missing(
    dataset: &Dataset,
    types: &[ColumnType],
    placeholder: &str,
) -> Result<ImputeOutcome> {
    if dataset.is_empty() {
        return Ok(ImputeOutcome {
            dataset: dataset.clone(),
            cells_filled: 0,
        });
    }

    // One fill value per column that actually has gaps
    let mut fills: Vec<Option<Cell>> = Vec::with_capacity(dataset.column_count());
    for (idx, column_type) in types.iter().enumerate() {
        let has_missing = dataset.column(idx).any(Cell::is_missing);
        if !has_missing {
            fills.push(None);
            continue;
        }
        let fill = match column_type {
            ColumnType::Numeric => Cell::Numeric(column_mean(dataset, idx)),
            ColumnType::Text => column_mode(dataset, idx)
                .unwrap_or_else(|| Cell::Text(placeholder.to_string())),
        };
        debug!(column = %dataset.columns()[idx], fill = %fill, "imputing missing cells");
        fills.push(Some(fill));
    }

    let mut cells_filled = 0usize;
    let rows = dataset
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(idx, cell)| {
                    if cell.is_missing() {
                        if let Some(fill) = &fills[idx] {
                            cells_filled += 1;
                            return fill.clone();
                        }
                    }
                    cell.clone()
                })
                .collect()
        })
        .collect();

    let dataset = Dataset::new(dataset.columns().to_vec(), rows)?;
    Ok(ImputeOutcome {
        dataset,
        cells_filled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn dataset(columns: &[&str], rows: Vec<Vec<Cell>>) -> Dataset {
        Dataset::new(columns.iter().map(|c| (*c).to_string()).collect(), rows).unwrap()
    }

    #[test]
    fn test_numeric_mean_fill() {
        let ds = dataset(
            &["age"],
            vec![
                vec![Cell::Numeric(20.0)],
                vec![Cell::Missing],
                vec![Cell::Numeric(30.0)],
            ],
        );
        let outcome = impute_missing(&ds, &[ColumnType::Numeric], "unknown").unwrap();
        assert_eq!(outcome.cells_filled, 1);
        assert_eq!(outcome.dataset.rows()[1][0], Cell::Numeric(25.0));
    }

    #[test]
    fn test_all_missing_numeric_fills_zero() {
        let ds = dataset(&["n"], vec![vec![Cell::Missing], vec![Cell::Missing]]);
        let outcome = impute_missing(&ds, &[ColumnType::Numeric], "unknown").unwrap();
        assert_eq!(outcome.dataset.rows()[0][0], Cell::Numeric(0.0));
        assert_eq!(outcome.cells_filled, 2);
    }

    #[test]
    fn test_text_mode_fill() {
        let ds = dataset(
            &["dept"],
            vec![
                vec![text("it")],
                vec![text("hr")],
                vec![text("it")],
                vec![Cell::Missing],
            ],
        );
        let outcome = impute_missing(&ds, &[ColumnType::Text], "unknown").unwrap();
        assert_eq!(outcome.dataset.rows()[3][0], text("it"));
    }

    #[test]
    fn test_mode_tie_breaks_by_first_appearance() {
        let ds = dataset(
            &["dept"],
            vec![
                vec![text("hr")],
                vec![text("it")],
                vec![text("it")],
                vec![text("hr")],
                vec![Cell::Missing],
            ],
        );
        let outcome = impute_missing(&ds, &[ColumnType::Text], "unknown").unwrap();
        assert_eq!(outcome.dataset.rows()[4][0], text("hr"));
    }

    #[test]
    fn test_all_missing_text_uses_placeholder() {
        let ds = dataset(&["t"], vec![vec![Cell::Missing]]);
        let outcome = impute_missing(&ds, &[ColumnType::Text], "unknown").unwrap();
        assert_eq!(outcome.dataset.rows()[0][0], text("unknown"));
    }

    #[test]
    fn test_row_count_unchanged() {
        let ds = dataset(
            &["a", "b"],
            vec![
                vec![Cell::Missing, text("x")],
                vec![Cell::Numeric(1.0), Cell::Missing],
            ],
        );
        let outcome =
            impute_missing(&ds, &[ColumnType::Numeric, ColumnType::Text], "unknown").unwrap();
        assert_eq!(outcome.dataset.row_count(), 2);
        assert_eq!(outcome.cells_filled, 2);
        assert_eq!(outcome.dataset.missing_count(), 0);
    }

    #[test]
    fn test_mean_is_plain_f64_arithmetic() {
        let ds = dataset(
            &["n"],
            vec![
                vec![Cell::Numeric(0.1)],
                vec![Cell::Numeric(0.2)],
                vec![Cell::Missing],
            ],
        );
        let outcome = impute_missing(&ds, &[ColumnType::Numeric], "unknown").unwrap();
        let expected = (0.1_f64 + 0.2_f64) / 2.0;
        assert_eq!(outcome.dataset.rows()[2][0], Cell::Numeric(expected));
    }
}
