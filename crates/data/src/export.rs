//! Export of processed signal rows.

use crate::csv_storage::CsvStorage;
use anyhow::{anyhow, Context, Result};
use insti_signal_core::ProcessedBar;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// File format for exported signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Guesses the format from a file extension; unknown or missing
    /// extensions fall back to CSV.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow!(
                "Invalid export format: '{}'. Valid values: csv, json",
                s
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

pub struct JsonStorage;

impl JsonStorage {
    /// Writes processed bars as a pretty-printed JSON array.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_signals(path: impl AsRef<Path>, bars: &[ProcessedBar]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
        Self::write_signals_to(BufWriter::new(file), bars)
            .with_context(|| format!("Failed to write JSON file: {}", path.display()))
    }

    /// # Errors
    /// Returns error if serialization or the underlying write fails.
    pub fn write_signals_to<W: Write>(mut sink: W, bars: &[ProcessedBar]) -> Result<()> {
        serde_json::to_writer_pretty(&mut sink, bars)?;
        sink.write_all(b"\n")?;
        sink.flush()?;
        Ok(())
    }
}

/// Writes `bars` to `path` in the given format.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn export_signals(
    path: impl AsRef<Path>,
    bars: &[ProcessedBar],
    format: ExportFormat,
) -> Result<()> {
    let path = path.as_ref();
    match format {
        ExportFormat::Csv => CsvStorage::write_signals(path, bars)?,
        ExportFormat::Json => JsonStorage::write_signals(path, bars)?,
    }
    tracing::info!(path = %path.display(), %format, rows = bars.len(), "Exported signals");
    Ok(())
}
