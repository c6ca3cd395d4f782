//! Liquidity sweep ("trap") detection.
//!
//! A sweep is a bar that pierces the recent swing extreme and then rejects it,
//! leaving a long wick back inside the range: the stop-hunt signature.

use crate::rolling::{RollingOp, RollingWindow};
use insti_signal_core::{Bar, LiquidityTrapConfig};

/// Output for a bar that swept the prior swing high.
pub const HIGH_SWEEP: f64 = 1.0;
/// Output for a bar that swept the prior swing low.
pub const LOW_SWEEP: f64 = -1.0;
pub const NO_SWEEP: f64 = 0.0;

/// Swing levels formed by the bars strictly before the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorSwing {
    pub high: f64,
    pub low: f64,
}

/// Tracks the highest high and lowest low of the last `lookback` bars.
#[derive(Debug, Clone)]
pub struct SwingTracker {
    highs: RollingWindow,
    lows: RollingWindow,
}

impl SwingTracker {
    #[must_use]
    pub fn new(lookback: usize) -> Self {
        Self {
            highs: RollingWindow::new(lookback, 1, RollingOp::Max),
            lows: RollingWindow::new(lookback, 1, RollingOp::Min),
        }
    }

    /// Swing levels of the bars seen so far; `None` before the first bar.
    #[must_use]
    pub fn prior(&self) -> Option<PriorSwing> {
        Some(PriorSwing {
            high: self.highs.value()?,
            low: self.lows.value()?,
        })
    }

    pub fn push(&mut self, bar: &Bar) {
        self.highs.push(bar.high);
        self.lows.push(bar.low);
    }
}

/// Classifies one bar against the prior swing levels.
///
/// A flat bar carries no wick information and is never a sweep. When both
/// sweep conditions hold the high sweep wins.
#[must_use]
pub fn classify_sweep(bar: &Bar, prior: PriorSwing, config: &LiquidityTrapConfig) -> f64 {
    let range = bar.high - bar.low;
    if range == 0.0 {
        return NO_SWEEP;
    }

    let upper_wick = (bar.high - bar.open.max(bar.close)) / range;
    let lower_wick = (bar.open.min(bar.close) - bar.low) / range;

    if bar.high > prior.high && upper_wick >= config.wick_threshold {
        HIGH_SWEEP
    } else if bar.low < prior.low && lower_wick >= config.wick_threshold {
        LOW_SWEEP
    } else {
        NO_SWEEP
    }
}

/// Sweep flag per bar: 1.0 high sweep, -1.0 low sweep, 0.0 otherwise.
///
/// Each bar is judged against the highest high and lowest low of the
/// `lookback` bars before it. The first bar has no prior window and yields
/// 0.0.
#[must_use]
pub fn liquidity_trap(bars: &[Bar], lookback: usize, config: &LiquidityTrapConfig) -> Vec<f64> {
    let mut swings = SwingTracker::new(lookback);
    bars.iter()
        .map(|bar| {
            let flag = swings
                .prior()
                .map_or(NO_SWEEP, |prior| classify_sweep(bar, prior, config));
            swings.push(bar);
            flag
        })
        .collect()
}
