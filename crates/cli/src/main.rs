//! tidyup CLI
//!
//! Batch tool for sorting files into category folders and cleaning
//! delimited tabular datasets.

mod config;
mod progress;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::AppConfig;
use progress::ProgressReporter;
use tidyup_clean::{infer_column_types, CleaningPipeline, ColumnType};
use tidyup_formats::{write_dataset, Dataset, DelimitedReader};
use tidyup_organize::{organize_directory, plan_directory};

#[derive(Parser)]
#[command(name = "tidyup")]
#[command(version, about = "Batch file organization and dataset cleaning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output reports in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort the files of a directory into category folders
    Organize {
        /// Directory to organize
        #[arg(short, long)]
        source: PathBuf,

        /// Destination root for category folders (defaults to the source)
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Config file with a custom category table (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show the classification plan without moving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Clean a delimited dataset
    Clean {
        /// Input file (.csv, .tsv, optionally .gz-compressed)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the cleaned dataset
        #[arg(short, long)]
        output: PathBuf,

        /// Config file with cleaning options (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show statistics without writing output
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect a dataset file
    Inspect {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Organize {
            source,
            dest,
            config,
            dry_run,
        } => organize(source, dest, config.as_deref(), dry_run, cli.json),
        Commands::Clean {
            input,
            output,
            config,
            dry_run,
        } => clean(input, output, config.as_deref(), dry_run, cli.json),
        Commands::Inspect { input, limit } => inspect(input, limit, cli.json),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tidyup", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn organize(
    source: PathBuf,
    dest: Option<PathBuf>,
    config: Option<&Path>,
    dry_run: bool,
    json_output: bool,
) -> Result<()> {
    let app_config = AppConfig::load_or_default(config)?;
    let table = app_config.extension_table();
    let destination = dest.unwrap_or_else(|| source.clone());

    info!("Starting organization");
    info!("  Source: {:?}", source);
    info!("  Destination: {:?}", destination);
    info!("  Dry run: {}", dry_run);

    if dry_run {
        let plan = plan_directory(&source, &table)?;
        if json_output {
            let entries: Vec<_> = plan
                .iter()
                .map(|(path, category)| {
                    serde_json::json!({
                        "file": path.to_string_lossy(),
                        "category": category,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            for (path, category) in &plan {
                println!("{} -> {category}/", path.display());
            }
            println!("{} file(s) would be moved", plan.len());
        }
        return Ok(());
    }

    let report = organize_directory(&source, &table, &destination)?;

    if json_output {
        let output = serde_json::json!({
            "source": source.to_string_lossy(),
            "destination": destination.to_string_lossy(),
            "moved": report.total_moved(),
            "failed": report.total_failed(),
            "categories": report.category_counts(),
            "outcomes": report.outcomes(),
            "failures": report.failures(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        progress::print_organize_summary(&source, &destination, &report);
    }

    if report.total_failed() > 0 {
        bail!("{} file(s) failed to move", report.total_failed());
    }
    Ok(())
}

fn clean(
    input: PathBuf,
    output: PathBuf,
    config: Option<&Path>,
    dry_run: bool,
    json_output: bool,
) -> Result<()> {
    let app_config = AppConfig::load_or_default(config)?;
    let clean_config = app_config.clean_config();

    info!("Starting cleaning");
    info!("  Input: {:?}", input);
    if !dry_run {
        info!("  Output: {:?}", output);
    }

    let reporter = ProgressReporter::spinner("reading dataset");
    let dataset = DelimitedReader::open(&input)
        .and_then(|reader| {
            reader
                .with_null_markers(clean_config.null_markers.clone())
                .read_dataset()
        })
        .with_context(|| format!("Failed to read dataset: {}", input.display()))?;

    reporter.set_stage("cleaning dataset");
    let pipeline = CleaningPipeline::new(clean_config);
    let (cleaned, report) = pipeline
        .clean(&dataset)
        .with_context(|| format!("Failed to clean dataset: {}", input.display()))?;

    if !dry_run {
        reporter.set_stage("writing cleaned dataset");
        write_dataset(&cleaned, &output)
            .with_context(|| format!("Failed to write dataset: {}", output.display()))?;
    }
    reporter.finish();

    if json_output {
        let summary = serde_json::json!({
            "input": input.to_string_lossy(),
            "output": if dry_run { serde_json::Value::Null } else {
                serde_json::Value::String(output.to_string_lossy().to_string())
            },
            "report": report,
            "dry_run": dry_run,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let written = if dry_run { None } else { Some(output.as_path()) };
        progress::print_clean_summary(&input, written, &report);
    }

    Ok(())
}

fn inspect(input: PathBuf, limit: usize, json_output: bool) -> Result<()> {
    let dataset = DelimitedReader::open(&input)
        .and_then(DelimitedReader::read_dataset)
        .with_context(|| format!("Failed to read dataset: {}", input.display()))?;
    let typed = infer_column_types(&dataset);

    if json_output {
        let columns: Vec<_> = dataset
            .columns()
            .iter()
            .zip(&typed.types)
            .map(|(name, column_type)| {
                serde_json::json!({
                    "name": name,
                    "type": type_name(*column_type),
                })
            })
            .collect();
        let summary = serde_json::json!({
            "file": input.to_string_lossy(),
            "rows": dataset.row_count(),
            "columns": columns,
            "missing_cells": dataset.missing_count(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", input.display());
    println!(
        "  {} rows, {} columns, {} missing cells",
        dataset.row_count(),
        dataset.column_count(),
        dataset.missing_count()
    );
    for (name, column_type) in dataset.columns().iter().zip(&typed.types) {
        println!("  {name}: {}", type_name(*column_type));
    }
    print_rows(&dataset, limit);
    Ok(())
}

fn type_name(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Numeric => "numeric",
        ColumnType::Text => "text",
    }
}

fn print_rows(dataset: &Dataset, limit: usize) {
    for row in dataset.rows().iter().take(limit) {
        let fields: Vec<String> = row.iter().map(|cell| cell.canonical()).collect();
        println!("  | {}", fields.join(" | "));
    }
    if dataset.row_count() > limit {
        println!("  ... {} more row(s)", dataset.row_count() - limit);
    }
}
