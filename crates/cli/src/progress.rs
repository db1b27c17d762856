//! Progress reporting and summary printing for the CLI

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tidyup_clean::CleaningReport;
use tidyup_organize::OrganizationReport;

/// Spinner shown while a long operation runs
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a spinner with an initial stage message
    pub fn spinner(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(message.to_string());
        Self { bar }
    }

    /// Update the stage message
    pub fn set_stage(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Stop the spinner and clear the line
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Print the organization summary as a human-readable report
pub fn print_organize_summary(source: &Path, destination: &Path, report: &OrganizationReport) {
    println!();
    println!("Organization complete");
    println!("  Source:      {}", source.display());
    println!("  Destination: {}", destination.display());
    println!("  Moved:       {}", report.total_moved());
    println!("  Failed:      {}", report.total_failed());
    for (category, count) in report.category_counts() {
        println!("    {category}: {count}");
    }
    for failure in report.failures() {
        println!("  FAILED {}: {}", failure.source.display(), failure.reason);
    }
}

/// Print the before/after cleaning summary
pub fn print_clean_summary(input: &Path, output: Option<&Path>, report: &CleaningReport) {
    println!();
    println!("Cleaning complete");
    println!("  Input:  {}", input.display());
    if let Some(output) = output {
        println!("  Output: {}", output.display());
    }
    println!(
        "  Rows:   {} -> {} (removed {})",
        report.rows_before,
        report.rows_after,
        report.rows_removed()
    );
    println!("  Missing values handled: {}", report.missing_values_handled);
    println!("  Duplicates removed:     {}", report.duplicates_removed);
    if !report.untypeable_columns.is_empty() {
        println!(
            "  Mixed columns treated as text: {}",
            report.untypeable_columns.join(", ")
        );
    }
}
