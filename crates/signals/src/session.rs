//! Trading-session weighting by UTC hour.

use chrono::{DateTime, Timelike, Utc};
use insti_signal_core::SessionWeights;

/// Broad liquidity regimes of the trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Session {
    /// 00:00-07:59 UTC
    Asia,
    /// 08:00-12:59 UTC
    London,
    /// 13:00-21:59 UTC
    NewYork,
    /// 22:00-23:59 UTC
    OffHours,
}

impl Session {
    /// Buckets an hour of day. Hours past 23 fall into off-hours.
    #[must_use]
    pub const fn from_hour(hour_utc: u32) -> Self {
        match hour_utc {
            0..=7 => Self::Asia,
            8..=12 => Self::London,
            13..=21 => Self::NewYork,
            _ => Self::OffHours,
        }
    }

    #[must_use]
    pub fn at(time: &DateTime<Utc>) -> Self {
        Self::from_hour(time.hour())
    }

    #[must_use]
    pub const fn weight(self, weights: &SessionWeights) -> f64 {
        match self {
            Self::Asia => weights.asia,
            Self::London => weights.london,
            Self::NewYork => weights.new_york,
            Self::OffHours => weights.off_hours,
        }
    }
}

/// Session weight for an hour of day.
#[must_use]
pub const fn session_index(hour_utc: u32, weights: &SessionWeights) -> f64 {
    Session::from_hour(hour_utc).weight(weights)
}
