//! Error types for the signal pipeline.

use thiserror::Error;

/// Structural input failures that abort a whole batch.
///
/// Numeric edge cases inside an otherwise valid batch (warm-up, flat bars,
/// missing auxiliary series) never surface here; they degrade to `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The input contained zero bars.
    #[error("no data to process")]
    EmptyInput,

    /// A bar's time field could not be parsed into a UTC timestamp.
    #[error("invalid time format found: {raw}")]
    InvalidTimeFormat {
        /// The offending raw value, as it appeared in the input.
        raw: String,
    },
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A window or look-back length was zero.
    #[error("{name} must be at least 1, got {value}")]
    ZeroLength { name: &'static str, value: usize },

    /// Rolling warm-up can never be satisfied.
    #[error("rolling min_periods ({min_periods}) exceeds window ({window})")]
    MinPeriodsExceedWindow { min_periods: usize, window: usize },

    /// Normalization range is empty or inverted.
    #[error("normalization bounds must satisfy lo < hi, got lo={lo} hi={hi}")]
    InvalidBounds { lo: f64, hi: f64 },

    /// Classification thresholds overlap.
    #[error("sell threshold ({sell}) must be below buy threshold ({buy})")]
    InvalidThresholds { buy: f64, sell: f64 },

    /// A numeric parameter was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}
