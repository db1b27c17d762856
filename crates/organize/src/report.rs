//! Move outcomes and the aggregated organization report

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The result of moving one file, immutable once created
#[derive(Debug, Clone, Serialize)]
pub struct MoveOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub category: String,
    /// True when a collision suffix was appended to the destination name
    pub renamed: bool,
}

/// A file that could not be moved
#[derive(Debug, Clone, Serialize)]
pub struct MoveFailure {
    pub source: PathBuf,
    pub reason: String,
}

/// Aggregate of a batch organization run
///
/// Built incrementally by folding per-file outcomes; category counts are
/// simple tallies and independent of processing order.
#[derive(Debug, Default, Serialize)]
pub struct OrganizationReport {
    outcomes: Vec<MoveOutcome>,
    failures: Vec<MoveFailure>,
}

impl OrganizationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: MoveOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn record_failure(&mut self, source: PathBuf, reason: String) {
        self.failures.push(MoveFailure { source, reason });
    }

    pub fn outcomes(&self) -> &[MoveOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> &[MoveFailure] {
        &self.failures
    }

    pub fn total_moved(&self) -> usize {
        self.outcomes.len()
    }

    pub fn total_failed(&self) -> usize {
        self.failures.len()
    }

    /// Files moved per category, sorted by category name
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            *counts.entry(outcome.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
