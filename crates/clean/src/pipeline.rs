//! Cleaning pipeline orchestration
//!
//! Runs the fixed stage order: missing-value detection, imputation,
//! standardization (with re-imputation of uncovered residue), duplicate
//! removal. Every stage returns a new dataset; the input is never mutated,
//! which lets the report diff snapshots between stages.

use crate::dedup::remove_duplicates;
use crate::impute::impute_missing;
use crate::standardize::Standardizer;
use crate::typing::infer_column_types;
use crate::Result;
use serde::Serialize;
use tidyup_formats::{default_null_markers, Dataset};
use tracing::info;

/// Cleaning configuration
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Markers recognized as missing on read (case-insensitive)
    pub null_markers: Vec<String>,
    /// Fill value for text columns with no mode
    pub text_placeholder: String,
    /// Lowercase text cells during standardization
    pub lowercase_text: bool,
    /// Trim text cells during standardization
    pub trim_whitespace: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            null_markers: default_null_markers(),
            text_placeholder: "unknown".to_string(),
            lowercase_text: true,
            trim_whitespace: true,
        }
    }
}

impl CleanConfig {
    /// Preset that keeps original casing
    pub fn raw_case() -> Self {
        Self {
            lowercase_text: false,
            ..Self::default()
        }
    }
}

/// Summary of one cleaning run
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    /// Cells filled by imputation, including residue re-imputed after
    /// standardization
    pub missing_values_handled: usize,
    pub duplicates_removed: usize,
    /// Mixed columns that fell back to text handling
    pub untypeable_columns: Vec<String>,
}

impl CleaningReport {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Deterministic dataset cleaning pipeline
pub struct CleaningPipeline {
    config: CleanConfig,
}

impl CleaningPipeline {
    pub fn new(config: CleanConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(CleanConfig::default())
    }

    pub fn config(&self) -> &CleanConfig {
        &self.config
    }

    /// Clean a dataset, returning the cleaned copy and a change report
    ///
    /// A dataset with zero rows or zero columns passes through unchanged
    /// with an all-zero report. Cleaning is idempotent: running the pipeline
    /// over its own output changes nothing.
    pub fn clean(&self, dataset: &Dataset) -> Result<(Dataset, CleaningReport)> {
        if dataset.is_empty() {
            return Ok((
                dataset.clone(),
                CleaningReport {
                    rows_before: dataset.row_count(),
                    rows_after: dataset.row_count(),
                    ..CleaningReport::default()
                },
            ));
        }

        let rows_before = dataset.row_count();
        let typed = infer_column_types(dataset);

        // Stage 1+2: detect and fill missing cells
        let imputed = impute_missing(dataset, &typed.types, &self.config.text_placeholder)?;
        let mut missing_values_handled = imputed.cells_filled;

        // Stage 3: standardize, re-imputing any residue the coercion uncovered
        let standardizer =
            Standardizer::new(self.config.trim_whitespace, self.config.lowercase_text);
        let standardized = standardizer.standardize(&imputed.dataset, &typed.types)?;
        let current = if standardized.new_missing > 0 {
            let reimputed = impute_missing(
                &standardized.dataset,
                &typed.types,
                &self.config.text_placeholder,
            )?;
            missing_values_handled += reimputed.cells_filled;
            reimputed.dataset
        } else {
            standardized.dataset
        };

        // Stage 4: stable duplicate removal
        let deduped = remove_duplicates(&current)?;

        let report = CleaningReport {
            rows_before,
            rows_after: deduped.dataset.row_count(),
            missing_values_handled,
            duplicates_removed: deduped.duplicates_removed,
            untypeable_columns: typed.untypeable,
        };

        info!(
            rows_before = report.rows_before,
            rows_after = report.rows_after,
            missing_values_handled = report.missing_values_handled,
            duplicates_removed = report.duplicates_removed,
            "cleaning complete"
        );

        Ok((deduped.dataset, report))
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Builder for cleaning configuration
pub struct CleaningPipelineBuilder {
    config: CleanConfig,
}

impl CleaningPipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: CleanConfig::default(),
        }
    }

    pub fn null_markers(mut self, markers: Vec<String>) -> Self {
        self.config.null_markers = markers;
        self
    }

    pub fn text_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.text_placeholder = placeholder.into();
        self
    }

    pub fn lowercase_text(mut self, lowercase: bool) -> Self {
        self.config.lowercase_text = lowercase;
        self
    }

    pub fn trim_whitespace(mut self, trim: bool) -> Self {
        self.config.trim_whitespace = trim;
        self
    }

    pub fn build(self) -> CleaningPipeline {
        CleaningPipeline::new(self.config)
    }
}

impl Default for CleaningPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidyup_formats::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn dataset(columns: &[&str], rows: Vec<Vec<Cell>>) -> Dataset {
        Dataset::new(columns.iter().map(|c| (*c).to_string()).collect(), rows).unwrap()
    }

    /// Rows loaded from `[{"age":"25","city":"NY"},{"age":"","city":"ny"},
    /// {"age":"25","city":"NY"}]`
    fn reference_dataset() -> Dataset {
        dataset(
            &["age", "city"],
            vec![
                vec![Cell::Numeric(25.0), text("NY")],
                vec![Cell::Missing, text("ny")],
                vec![Cell::Numeric(25.0), text("NY")],
            ],
        )
    }

    #[test]
    fn test_reference_scenario() {
        let (cleaned, report) = CleaningPipeline::with_defaults()
            .clean(&reference_dataset())
            .unwrap();

        // The missing age imputes to the mean of the non-missing values
        // (25), the cities standardize to "ny", and every row then compares
        // equal, so duplicate removal keeps only the first.
        assert_eq!(report.rows_before, 3);
        assert_eq!(report.missing_values_handled, 1);
        assert_eq!(report.duplicates_removed, 2);
        assert_eq!(cleaned.row_count(), 1);
        assert_eq!(cleaned.rows()[0][0], Cell::Numeric(25.0));
        assert_eq!(cleaned.rows()[0][1], text("ny"));
    }

    #[test]
    fn test_reference_scenario_without_imputation_collapse() {
        // Same shape, but the missing row stays distinct after imputation:
        // only the true duplicate is removed.
        let ds = dataset(
            &["age", "city"],
            vec![
                vec![Cell::Numeric(25.0), text("NY")],
                vec![Cell::Missing, text("Boston")],
                vec![Cell::Numeric(25.0), text("NY")],
            ],
        );
        let (cleaned, report) = CleaningPipeline::with_defaults().clean(&ds).unwrap();

        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(report.missing_values_handled, 1);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(cleaned.rows()[1][0], Cell::Numeric(25.0));
        assert_eq!(cleaned.rows()[1][1], text("boston"));
    }

    #[test]
    fn test_idempotent() {
        let messy = dataset(
            &["age", "name", "mixed"],
            vec![
                vec![Cell::Numeric(30.0), text("  Ada "), Cell::Numeric(1.0)],
                vec![Cell::Missing, text("Grace"), text("two")],
                vec![Cell::Numeric(40.0), Cell::Missing, text("three")],
                vec![Cell::Numeric(30.0), text("ada"), Cell::Numeric(1.0)],
            ],
        );
        let pipeline = CleaningPipeline::with_defaults();

        let (once, report_once) = pipeline.clean(&messy).unwrap();
        let (twice, report_twice) = pipeline.clean(&once).unwrap();

        assert_eq!(once, twice);
        assert_eq!(report_twice.missing_values_handled, 0);
        assert_eq!(report_twice.duplicates_removed, 0);
        assert!(report_once.rows_after >= report_twice.rows_after);
    }

    #[test]
    fn test_empty_dataset_passes_through() {
        let (cleaned, report) = CleaningPipeline::with_defaults()
            .clean(&Dataset::empty())
            .unwrap();
        assert!(cleaned.is_empty());
        assert_eq!(report, CleaningReport::default());
    }

    #[test]
    fn test_header_only_dataset_passes_through() {
        let ds = dataset(&["a", "b"], Vec::new());
        let (cleaned, report) = CleaningPipeline::with_defaults().clean(&ds).unwrap();
        assert_eq!(cleaned, ds);
        assert_eq!(report.rows_before, 0);
        assert_eq!(report.rows_after, 0);
    }

    #[test]
    fn test_no_missing_cells_after_cleaning() {
        let ds = dataset(
            &["n", "t"],
            vec![
                vec![Cell::Missing, Cell::Missing],
                vec![Cell::Numeric(2.0), text("x")],
                vec![Cell::Missing, text("y")],
            ],
        );
        let (cleaned, _) = CleaningPipeline::with_defaults().clean(&ds).unwrap();
        assert_eq!(cleaned.missing_count(), 0);
    }

    #[test]
    fn test_untypeable_column_reported() {
        let ds = dataset(
            &["mixed"],
            vec![
                vec![Cell::Numeric(1.0)],
                vec![text("x")],
            ],
        );
        let (_, report) = CleaningPipeline::with_defaults().clean(&ds).unwrap();
        assert_eq!(report.untypeable_columns, vec!["mixed".to_string()]);
    }

    #[test]
    fn test_residue_reimputation_counted() {
        // Numeric-majority column with one unparseable text cell: the
        // residue becomes missing during standardization and is re-imputed.
        let ds = dataset(
            &["n"],
            vec![
                vec![Cell::Numeric(10.0)],
                vec![Cell::Numeric(20.0)],
                vec![text("oops")],
            ],
        );
        let (cleaned, report) = CleaningPipeline::with_defaults().clean(&ds).unwrap();
        assert_eq!(report.missing_values_handled, 1);
        assert_eq!(cleaned.rows()[2][0], Cell::Numeric(15.0));
    }

    #[test]
    fn test_rows_removed_accounting() {
        let ds = dataset(
            &["a"],
            vec![
                vec![text("x")],
                vec![text(" X ")],
                vec![text("y")],
            ],
        );
        let (_, report) = CleaningPipeline::with_defaults().clean(&ds).unwrap();
        // " X " standardizes to "x" and becomes a duplicate
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.rows_removed(), report.duplicates_removed);
    }

    #[test]
    fn test_builder() {
        let pipeline = CleaningPipelineBuilder::new()
            .text_placeholder("n/a")
            .lowercase_text(false)
            .build();
        assert_eq!(pipeline.config().text_placeholder, "n/a");
        assert!(!pipeline.config().lowercase_text);
    }
}
