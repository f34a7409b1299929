//! SentiLab CLI — run the direction pipeline and inspect datasets.
//!
//! Commands:
//! - `run` — clean, split, fit, and score a dataset; prints the accuracy
//! - `inspect` — report row count, per-column null counts, and date range

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use polars::prelude::*;
use std::path::PathBuf;
use sentilab_core::{
    clean, read_csv, DirectionPipeline, ForestClassifier, ForestParams, PipelineConfig,
};

#[derive(Parser)]
#[command(
    name = "sentilab",
    about = "SentiLab CLI — sentiment-lag market direction pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline on a CSV dataset and report validation accuracy.
    Run {
        /// Path to the observation CSV.
        #[arg(long)]
        data: PathBuf,

        /// Path to a TOML pipeline config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Cutoff date (YYYY-MM-DD). Overrides the config value.
        #[arg(long)]
        cutoff: Option<String>,

        /// Random-forest seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Directory for the JSON run report. No report when omitted.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Report row count, null counts, and date range of a CSV dataset.
    Inspect {
        /// Path to the observation CSV.
        #[arg(long)]
        data: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            cutoff,
            seed,
            output_dir,
        } => cmd_run(&data, config.as_deref(), cutoff.as_deref(), seed, output_dir.as_deref()),
        Commands::Inspect { data } => cmd_inspect(&data),
    }
}

fn cmd_run(
    data: &std::path::Path,
    config_path: Option<&std::path::Path>,
    cutoff: Option<&str>,
    seed: u64,
    output_dir: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => PipelineConfig::from_toml_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(raw) = cutoff {
        config.cutoff_date = parse_date(raw)?;
    }

    let frame = read_csv(data).with_context(|| format!("reading {}", data.display()))?;

    let classifier = ForestClassifier::new(ForestParams {
        seed,
        ..ForestParams::default()
    });
    let report = DirectionPipeline::new(config, classifier)
        .run(frame)
        .context("pipeline run failed")?;

    println!("Accuracy: {}", report.accuracy);
    println!(
        "  train rows: {}  validation rows: {}  cutoff: {}",
        report.train_rows, report.validation_rows, report.cutoff_date
    );

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        let path = dir.join("run_report.json");
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("  report: {}", path.display());
    }

    Ok(())
}

fn cmd_inspect(data: &std::path::Path) -> Result<()> {
    let frame = read_csv(data).with_context(|| format!("reading {}", data.display()))?;

    println!("rows: {}", frame.height());
    println!("columns:");
    for column in frame.get_columns() {
        println!(
            "  {:<24} {:<10} nulls: {}",
            column.name().as_str(),
            format!("{}", column.dtype()),
            column.null_count()
        );
    }

    let cleaned = clean(frame, "Date").context("cleaning dataset")?;
    println!("complete rows: {}", cleaned.height());

    let range = cleaned
        .lazy()
        .select([
            col("Date").min().alias("first"),
            col("Date").max().alias("last"),
        ])
        .collect()
        .context("computing date range")?;
    if let Some(row) = range.get(0) {
        println!("date range: {} .. {}", row[0], row[1]);
    }

    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}
