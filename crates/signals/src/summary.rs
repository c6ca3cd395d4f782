//! Run summary of a processed batch: class counts, sweep counts, signal
//! range, and the latest bar's reading.

use chrono::{DateTime, Utc};
use insti_signal_core::{ClassificationThresholds, ProcessedBar, SignalClass};
use serde::Serialize;
use std::fmt;

/// Latest bar of the batch, with every channel that fed its signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestReading {
    pub time: DateTime<Utc>,
    pub institution_signal: f64,
    pub signal_class: SignalClass,
    pub dv: f64,
    pub dp: f64,
    pub session_index: f64,
    pub liq_trap: f64,
    pub dxy_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSummary {
    pub total: usize,
    pub buy: usize,
    pub sell: usize,
    pub neutral: usize,
    pub high_sweeps: usize,
    pub low_sweeps: usize,
    pub min_signal: f64,
    pub max_signal: f64,
    pub mean_signal: f64,
    pub thresholds: ClassificationThresholds,
    pub latest: LatestReading,
}

impl SignalSummary {
    /// Summarizes a processed batch; `None` for an empty slice.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_bars(bars: &[ProcessedBar], thresholds: ClassificationThresholds) -> Option<Self> {
        let last = bars.last()?;

        let count = |class: SignalClass| bars.iter().filter(|b| b.signal_class == class).count();
        let signals = bars.iter().map(|b| b.institution_signal);

        Some(Self {
            total: bars.len(),
            buy: count(SignalClass::Buy),
            sell: count(SignalClass::Sell),
            neutral: count(SignalClass::Neutral),
            high_sweeps: bars.iter().filter(|b| b.liq_trap > 0.0).count(),
            low_sweeps: bars.iter().filter(|b| b.liq_trap < 0.0).count(),
            min_signal: signals.clone().fold(f64::INFINITY, f64::min),
            max_signal: signals.clone().fold(f64::NEG_INFINITY, f64::max),
            mean_signal: signals.sum::<f64>() / bars.len() as f64,
            thresholds,
            latest: LatestReading {
                time: last.time,
                institution_signal: last.institution_signal,
                signal_class: last.signal_class,
                dv: last.dv,
                dp: last.dp,
                session_index: last.session_index,
                liq_trap: last.liq_trap,
                dxy_delta: last.dxy_delta,
            },
        })
    }
}

impl fmt::Display for SignalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let latest = &self.latest;
        writeln!(f, "Latest Signal  {}", latest.time.format("%a, %d %b %Y %H:%M:%S UTC"))?;
        writeln!(
            f,
            "  Institutional Signal: {:+.2} ({})",
            latest.institution_signal, latest.signal_class
        )?;
        writeln!(
            f,
            "  Thresholds: >= {:+.2} -> BUY | <= {:+.2} -> SELL",
            self.thresholds.buy, self.thresholds.sell
        )?;
        writeln!(
            f,
            "  dVolume {:.2} | dPrice {:.2} | Session {:.2} | Liq. Trap {:.2} | dDXY {:.3}",
            latest.dv, latest.dp, latest.session_index, latest.liq_trap, latest.dxy_delta
        )?;
        writeln!(f)?;
        writeln!(f, "Batch  {} bars", self.total)?;
        writeln!(
            f,
            "  BUY {} | SELL {} | NEUTRAL {}",
            self.buy, self.sell, self.neutral
        )?;
        writeln!(
            f,
            "  Liquidity sweeps: {} high, {} low",
            self.high_sweeps, self.low_sweeps
        )?;
        write!(
            f,
            "  Signal range: min {:+.3} | mean {:+.3} | max {:+.3}",
            self.min_signal, self.mean_signal, self.max_signal
        )
    }
}
