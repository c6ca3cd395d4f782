//! Process CLI command.
//!
//! Reads a CSV of OHLCV bars, runs the signal pipeline, optionally exports
//! the processed rows, and prints a summary of the batch.

use anyhow::{Context, Result};
use clap::Args;
use insti_signal_core::{ConfigLoader, SignalConfig, Timeframe};
use insti_signal_data::{export_signals, CsvStorage, ExportFormat};
use insti_signal_signals::{SignalPipeline, SignalSummary};
use std::path::{Path, PathBuf};

/// Arguments for the process command.
#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    /// Input CSV with time,open,high,low,close,volume[,dxy] columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// Bar interval of the input (m1, m5, m15, m30, h1)
    #[arg(short, long, default_value = "m5")]
    pub timeframe: Timeframe,

    /// Write processed rows to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (csv, json); inferred from the output extension if omitted
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Signal config TOML file (INSTI_* environment variables still apply)
    #[arg(short, long, env = "INSTI_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Loads configuration from an optional file plus the environment.
pub fn load_config(path: Option<&Path>) -> Result<SignalConfig> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Export format: explicit flag first, then the output extension.
#[must_use]
pub fn resolve_format(output: &Path, explicit: Option<ExportFormat>) -> ExportFormat {
    explicit.unwrap_or_else(|| ExportFormat::from_path(output))
}

pub fn run_process(args: ProcessArgs) -> Result<()> {
    tracing::info!(
        "Processing {} ({} timeframe)",
        args.input.display(),
        args.timeframe
    );

    let config = load_config(args.config.as_deref())?;
    let pipeline = SignalPipeline::new(config).context("Invalid signal configuration")?;

    let raw = CsvStorage::read_bars(&args.input)
        .with_context(|| format!("Failed to read bars from {}", args.input.display()))?;
    let processed = pipeline.process(&raw, args.timeframe)?;

    if let Some(output) = &args.output {
        let format = resolve_format(output, args.format);
        export_signals(output, &processed, format)?;
        println!("Wrote {} rows to {} ({format})", processed.len(), output.display());
    }

    if let Some(summary) = SignalSummary::from_bars(&processed, pipeline.config().thresholds) {
        println!("{summary}");
    }

    Ok(())
}
