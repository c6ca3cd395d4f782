use thiserror::Error;

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = ["time", "open", "high", "low", "close", "volume"];

/// Errors raised while turning a CSV source into raw bars.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The header row lacks one or more required columns.
    #[error(
        "CSV must contain headers: {} (missing: {})",
        REQUIRED_COLUMNS.join(", "),
        missing.join(", ")
    )]
    MissingColumns { missing: Vec<String> },

    /// A required numeric cell was empty or not a number.
    #[error("line {line}: invalid number in column '{column}': '{value}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// The source could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (bad quoting, invalid UTF-8, I/O failure mid-read).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
