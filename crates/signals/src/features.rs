//! Per-bar volume and range features relative to their trailing baselines.

use crate::rolling::rolling_mean;
use insti_signal_core::{Bar, RollingConfig};

/// Volume and price-range channels for a sorted batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BaseFeatures {
    /// Volume over its trailing mean
    pub dv: Vec<f64>,
    /// True range over its trailing mean, signed by bar direction
    pub dp: Vec<f64>,
}

impl BaseFeatures {
    /// Computes both channels. A bar whose baseline is still warming up, or
    /// is not positive, gets 0.0.
    #[must_use]
    pub fn compute(bars: &[Bar], rolling: &RollingConfig) -> Self {
        let volume: Vec<f64> = bars.iter().map(|b| b.volume).collect();
        let true_range: Vec<f64> = bars.iter().map(Bar::true_range).collect();

        let volume_mean = rolling_mean(&volume, rolling.window, rolling.min_periods);
        let range_mean = rolling_mean(&true_range, rolling.window, rolling.min_periods);

        let dv = volume
            .iter()
            .zip(&volume_mean)
            .map(|(&v, mean)| ratio_to_baseline(v, *mean))
            .collect();

        let dp = bars
            .iter()
            .zip(true_range.iter().zip(&range_mean))
            .map(|(bar, (&tr, mean))| ratio_to_baseline(tr, *mean) * bar.direction())
            .collect();

        Self { dv, dp }
    }
}

fn ratio_to_baseline(value: f64, baseline: Option<f64>) -> f64 {
    match baseline {
        Some(mean) if mean > 0.0 => value / mean,
        _ => 0.0,
    }
}
