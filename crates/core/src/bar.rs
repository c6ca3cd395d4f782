//! Bar types flowing through the signal pipeline.
//!
//! [`RawBar`] is what the ingestion layer hands over, [`Bar`] is the
//! time-normalized form the feature code works on, and [`ProcessedBar`] is
//! the per-bar output row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time field of a raw bar as it arrived from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarTime {
    /// Seconds since the Unix epoch; fractional seconds allowed.
    Epoch(f64),
    /// Calendar timestamp string, parsed later by the pipeline.
    Text(String),
}

impl fmt::Display for BarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epoch(secs) => write!(f, "{secs}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for BarTime {
    fn from(secs: f64) -> Self {
        Self::Epoch(secs)
    }
}

impl From<i64> for BarTime {
    #[allow(clippy::cast_precision_loss)]
    fn from(secs: i64) -> Self {
        Self::Epoch(secs as f64)
    }
}

impl From<&str> for BarTime {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for BarTime {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// One input record: OHLCV plus an optional auxiliary index level (DXY).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub time: BarTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dxy: Option<f64>,
}

impl RawBar {
    #[must_use]
    pub fn new(
        time: impl Into<BarTime>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            time: time.into(),
            open,
            high,
            low,
            close,
            volume,
            dxy: None,
        }
    }

    /// Attaches an auxiliary index level.
    #[must_use]
    pub const fn with_dxy(mut self, dxy: f64) -> Self {
        self.dxy = Some(dxy);
        self
    }
}

/// A raw bar whose time has been parsed to UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub dxy: Option<f64>,
}

impl Bar {
    /// High minus low. Does not reach back to the previous close.
    #[must_use]
    pub fn true_range(&self) -> f64 {
        self.high - self.low
    }

    /// Sign of the bar body: 1 for up bars, -1 for down bars, 0 for dojis.
    #[must_use]
    pub fn direction(&self) -> f64 {
        let body = self.close - self.open;
        if body > 0.0 {
            1.0
        } else if body < 0.0 {
            -1.0
        } else {
            0.0
        }
    }
}

/// Discrete classification of the composite signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalClass {
    Buy,
    Sell,
    Neutral,
}

impl SignalClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SignalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output row: the bar plus every derived feature channel and the signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedBar {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Cross-asset delta; 0.0 without an auxiliary series or enough history
    pub dxy_delta: f64,
    /// Volume relative to its trailing mean
    #[serde(rename = "dV")]
    pub dv: f64,
    /// True range relative to its trailing mean, signed by bar direction
    #[serde(rename = "dP")]
    pub dp: f64,
    pub session_index: f64,
    /// 1.0 high sweep, -1.0 low sweep, 0.0 otherwise
    pub liq_trap: f64,
    /// Composite score in [-1, 1]
    pub institution_signal: f64,
    pub signal_class: SignalClass,
}
