//! Composite institutional signal.
//!
//! Combines the five feature channels linearly, clips and rescales the result
//! into [-1, 1], and discretizes it into BUY / SELL / NEUTRAL.

use insti_signal_core::{
    ClassificationThresholds, CompositeWeights, NormalizationBounds, SignalClass,
};

/// Feature channels of one bar, as fed to the composite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureChannels {
    pub dv: f64,
    pub dp: f64,
    pub session_index: f64,
    pub liq_trap: f64,
    pub dxy_delta: f64,
}

/// Raw (unbounded) composite score.
///
/// Volume, price and session add; liquidity trap and cross-asset delta
/// subtract.
#[must_use]
pub fn composite(channels: &FeatureChannels, weights: &CompositeWeights) -> f64 {
    weights.volume * channels.dv
        + weights.price * channels.dp
        + weights.session * channels.session_index
        - weights.liquidity_trap * channels.liq_trap
        - weights.dxy_delta * channels.dxy_delta
}

/// Clips `value` to `[lo, hi]` and maps that range linearly onto [-1, 1].
///
/// NaN input maps to the midpoint (0.0).
#[must_use]
pub fn normalize_to_unit(value: f64, bounds: &NormalizationBounds) -> f64 {
    let NormalizationBounds { lo, hi } = *bounds;
    if value.is_nan() {
        return 0.0;
    }
    let clipped = value.clamp(lo, hi);
    (-1.0 + 2.0 * (clipped - lo) / (hi - lo)).clamp(-1.0, 1.0)
}

/// Discretizes a normalized signal. Both thresholds are inclusive.
#[must_use]
pub fn classify(value: f64, thresholds: &ClassificationThresholds) -> SignalClass {
    if value >= thresholds.buy {
        SignalClass::Buy
    } else if value <= thresholds.sell {
        SignalClass::Sell
    } else {
        SignalClass::Neutral
    }
}

/// Weights, bounds and thresholds bundled for per-bar scoring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalComposer {
    pub weights: CompositeWeights,
    pub bounds: NormalizationBounds,
    pub thresholds: ClassificationThresholds,
}

impl SignalComposer {
    #[must_use]
    pub const fn new(
        weights: CompositeWeights,
        bounds: NormalizationBounds,
        thresholds: ClassificationThresholds,
    ) -> Self {
        Self {
            weights,
            bounds,
            thresholds,
        }
    }

    /// Normalized signal and its class for one bar.
    #[must_use]
    pub fn score(&self, channels: &FeatureChannels) -> (f64, SignalClass) {
        let raw = composite(channels, &self.weights);
        let signal = normalize_to_unit(raw, &self.bounds);
        (signal, classify(signal, &self.thresholds))
    }
}
