//! semdiff-report - Render an overlap report from a comparison document.
//!
//! Reads a `{network1, network2, overlaps}` document, classifies it and writes
//! the report JSON to stdout (or `--output`). Logs go to stderr.
//!
//! # Configuration
//!
//! - `--config PATH` - TOML, JSON or YAML classifier configuration
//! - `SEMDIFF_SCHEMA_SUFFIX`, `SEMDIFF_EXTRA_IGNORED_KEYS` - used when no config file is given
//! - `RUST_LOG` - log filter, defaults to `info`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use semdiff_core::{ClassifierConfig, ComparisonDocument, OverlapClassifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod output;

/// Render the overlap report between two JSON Schema / JSON-LD vocabularies.
#[derive(Debug, Parser)]
#[command(name = "semdiff-report", version)]
struct Cli {
    /// Comparison document (JSON).
    input: PathBuf,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Classifier configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit the summary and context coverage alongside the report.
    #[arg(long)]
    summary: bool,

    /// Single-line JSON output.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClassifierConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClassifierConfig::from_env(),
    };
    config.validate()?;

    let doc = ComparisonDocument::from_file(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    tracing::info!(
        network1 = %doc.network1.name,
        network2 = %doc.network2.name,
        overlaps = doc.overlaps.len(),
        "classifying"
    );

    let classifier = OverlapClassifier::new(config);
    let rendered = if cli.summary {
        let classification = classifier.classify_with_summary(&doc)?;
        tracing::info!(
            overlapped = classification.summary.overlapped_schemas,
            isolated = classification.summary.isolated_network1
                + classification.summary.isolated_network2,
            "report ready"
        );
        output::render_with_summary(&classification, !cli.compact)?
    } else {
        let report = classifier.classify(&doc)?;
        tracing::info!(
            overlapped = report.overlapped().len(),
            isolated = report.isolated().len(),
            "report ready"
        );
        report.to_json_string(!cli.compact)?
    };

    output::write(cli.output.as_deref(), &rendered)
}
