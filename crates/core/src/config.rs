use crate::error::ConfigError;
use crate::timeframe::Timeframe;
use serde::{Deserialize, Serialize};

/// Every tunable constant of the signal pipeline.
///
/// `Default` reproduces the reference weights; a config file or environment
/// only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub rolling: RollingConfig,
    pub sessions: SessionWeights,
    pub lookbacks: TimeframeLookbacks,
    pub liquidity_trap: LiquidityTrapConfig,
    pub cross_asset: CrossAssetConfig,
    pub weights: CompositeWeights,
    pub normalization: NormalizationBounds,
    pub thresholds: ClassificationThresholds,
}

/// Trailing-mean window used for the volume and true-range baselines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingConfig {
    pub window: usize,
    pub min_periods: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            window: 20,
            min_periods: 5,
        }
    }
}

/// Weight assigned to each trading session (UTC hour buckets).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionWeights {
    /// 00:00-07:59
    pub asia: f64,
    /// 08:00-12:59
    pub london: f64,
    /// 13:00-21:59
    pub new_york: f64,
    /// 22:00-23:59
    pub off_hours: f64,
}

impl Default for SessionWeights {
    fn default() -> Self {
        Self {
            asia: 0.2,
            london: 0.6,
            new_york: 1.0,
            off_hours: 0.2,
        }
    }
}

/// Swing look-back, in bars, for each timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeframeLookbacks {
    pub m1: usize,
    pub m5: usize,
    pub m15: usize,
    pub m30: usize,
    pub h1: usize,
}

impl TimeframeLookbacks {
    #[must_use]
    pub const fn for_timeframe(&self, timeframe: Timeframe) -> usize {
        match timeframe {
            Timeframe::M1 => self.m1,
            Timeframe::M5 => self.m5,
            Timeframe::M15 => self.m15,
            Timeframe::M30 => self.m30,
            Timeframe::H1 => self.h1,
        }
    }
}

impl Default for TimeframeLookbacks {
    fn default() -> Self {
        Self {
            m1: 24,
            m5: 12,
            m15: 8,
            m30: 6,
            h1: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidityTrapConfig {
    /// Minimum rejection wick, as a fraction of the bar range
    pub wick_threshold: f64,
}

impl Default for LiquidityTrapConfig {
    fn default() -> Self {
        Self {
            wick_threshold: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossAssetConfig {
    /// Bars between the two auxiliary readings being differenced
    pub lag: usize,
}

impl Default for CrossAssetConfig {
    fn default() -> Self {
        Self { lag: 12 }
    }
}

/// Coefficients of the linear composite.
///
/// The trap and cross-asset channels are subtracted, so positive weights here
/// mean a high sweep or a rising DXY pushes the signal down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeWeights {
    pub volume: f64,
    pub price: f64,
    pub session: f64,
    pub liquidity_trap: f64,
    pub dxy_delta: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            volume: 0.40,
            price: 0.30,
            session: 0.20,
            liquidity_trap: 0.10,
            dxy_delta: 0.05,
        }
    }
}

/// Clip range of the raw composite before it is rescaled to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationBounds {
    pub lo: f64,
    pub hi: f64,
}

impl Default for NormalizationBounds {
    fn default() -> Self {
        Self { lo: -1.5, hi: 1.5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    /// Normalized values at or above this are BUY
    pub buy: f64,
    /// Normalized values at or below this are SELL
    pub sell: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            buy: 0.70,
            sell: -0.70,
        }
    }
}

impl SignalConfig {
    /// Checks that every parameter can produce a meaningful signal.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("rolling.window", self.rolling.window)?;
        non_zero("rolling.min_periods", self.rolling.min_periods)?;
        if self.rolling.min_periods > self.rolling.window {
            return Err(ConfigError::MinPeriodsExceedWindow {
                min_periods: self.rolling.min_periods,
                window: self.rolling.window,
            });
        }

        for tf in Timeframe::ALL {
            let name = match tf {
                Timeframe::M1 => "lookbacks.m1",
                Timeframe::M5 => "lookbacks.m5",
                Timeframe::M15 => "lookbacks.m15",
                Timeframe::M30 => "lookbacks.m30",
                Timeframe::H1 => "lookbacks.h1",
            };
            non_zero(name, self.lookbacks.for_timeframe(tf))?;
        }
        non_zero("cross_asset.lag", self.cross_asset.lag)?;

        let finite_params = [
            ("sessions.asia", self.sessions.asia),
            ("sessions.london", self.sessions.london),
            ("sessions.new_york", self.sessions.new_york),
            ("sessions.off_hours", self.sessions.off_hours),
            ("liquidity_trap.wick_threshold", self.liquidity_trap.wick_threshold),
            ("weights.volume", self.weights.volume),
            ("weights.price", self.weights.price),
            ("weights.session", self.weights.session),
            ("weights.liquidity_trap", self.weights.liquidity_trap),
            ("weights.dxy_delta", self.weights.dxy_delta),
            ("normalization.lo", self.normalization.lo),
            ("normalization.hi", self.normalization.hi),
            ("thresholds.buy", self.thresholds.buy),
            ("thresholds.sell", self.thresholds.sell),
        ];
        for (name, value) in finite_params {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if self.normalization.lo >= self.normalization.hi {
            return Err(ConfigError::InvalidBounds {
                lo: self.normalization.lo,
                hi: self.normalization.hi,
            });
        }
        if self.thresholds.sell >= self.thresholds.buy {
            return Err(ConfigError::InvalidThresholds {
                buy: self.thresholds.buy,
                sell: self.thresholds.sell,
            });
        }

        Ok(())
    }
}

const fn non_zero(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroLength { name, value })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SignalConfig::default().validate().is_ok());
    }

    #[test]
    fn lookback_table_matches_timeframes() {
        let lookbacks = TimeframeLookbacks::default();
        assert_eq!(lookbacks.for_timeframe(Timeframe::M1), 24);
        assert_eq!(lookbacks.for_timeframe(Timeframe::M5), 12);
        assert_eq!(lookbacks.for_timeframe(Timeframe::M15), 8);
        assert_eq!(lookbacks.for_timeframe(Timeframe::M30), 6);
        assert_eq!(lookbacks.for_timeframe(Timeframe::H1), 4);
    }

    #[test]
    fn rejects_min_periods_above_window() {
        let mut config = SignalConfig::default();
        config.rolling.min_periods = 30;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MinPeriodsExceedWindow {
                min_periods: 30,
                window: 20
            })
        );
    }

    #[test]
    fn rejects_zero_lookback() {
        let mut config = SignalConfig::default();
        config.lookbacks.h1 = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroLength {
                name: "lookbacks.h1",
                ..
            })
        ));
    }

    #[test]
    fn rejects_inverted_bounds_and_thresholds() {
        let mut config = SignalConfig::default();
        config.normalization = NormalizationBounds { lo: 1.0, hi: 1.0 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));

        let mut config = SignalConfig::default();
        config.thresholds = ClassificationThresholds {
            buy: -0.5,
            sell: 0.5,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn rejects_nan_weight() {
        let mut config = SignalConfig::default();
        config.weights.price = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                name: "weights.price",
                ..
            })
        ));
    }
}
