//! Stable duplicate-row removal
//!
//! Two rows are duplicates when every cell compares equal after
//! standardization. The first occurrence in original row order is kept.
//! Fingerprints are hashed in parallel; the keep/drop scan is sequential so
//! the result is deterministic and order-stable.

use crate::Result;
use ahash::{AHashMap, AHasher};
use rayon::prelude::*;
use std::hash::{Hash, Hasher};
use tidyup_formats::{Cell, Dataset};
use tracing::debug;

/// Result of a duplicate-removal pass
#[derive(Debug)]
pub struct DedupOutcome {
    pub dataset: Dataset,
    pub duplicates_removed: usize,
}

/// Fingerprint of one row
///
/// AHasher with default keys is deterministic within a run, which is all
/// the keep/drop scan needs.
fn row_fingerprint(row: &[Cell]) -> u64 {
    let mut hasher = AHasher::default();
    for cell in row {
        cell.hash(&mut hasher);
    }
    hasher.finish()
}

/// Remove duplicate rows, keeping the first occurrence
///
/// Hash-equal rows are verified cell for cell before being dropped, so a
/// fingerprint collision can never remove a distinct row.
pub fn remove_duplicates(dataset: &Dataset) -> Result<DedupOutcome> {
    if dataset.is_empty() {
        return Ok(DedupOutcome {
            dataset: dataset.clone(),
            duplicates_removed: 0,
        });
    }

    let fingerprints: Vec<u64> = dataset
        .rows()
        .par_iter()
        .map(|row| row_fingerprint(row))
        .collect();

    // fingerprint -> indices of kept rows with that fingerprint
    let mut seen: AHashMap<u64, Vec<usize>> = AHashMap::new();
    let mut kept: Vec<Vec<Cell>> = Vec::with_capacity(dataset.row_count());
    let mut duplicates_removed = 0usize;

    for (idx, row) in dataset.rows().iter().enumerate() {
        let bucket = seen.entry(fingerprints[idx]).or_default();
        let is_duplicate = bucket
            .iter()
            .any(|&kept_idx| kept[kept_idx] == *row);
        if is_duplicate {
            duplicates_removed += 1;
            continue;
        }
        bucket.push(kept.len());
        kept.push(row.clone());
    }

    debug!(
        rows_before = dataset.row_count(),
        duplicates_removed, "duplicate removal complete"
    );

    let dataset = Dataset::new(dataset.columns().to_vec(), kept)?;
    Ok(DedupOutcome {
        dataset,
        duplicates_removed,
    })
}
