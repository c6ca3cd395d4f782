use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar interval of the input series.
///
/// Only used to pick the liquidity-trap look-back so the swing window covers
/// a comparable wall-clock span on every interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    M1,
    #[default]
    M5,
    M15,
    M30,
    H1,
}

impl Timeframe {
    pub const ALL: [Self; 5] = [Self::M1, Self::M5, Self::M15, Self::M30, Self::H1];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "m1",
            Self::M5 => "m5",
            Self::M15 => "m15",
            Self::M30 => "m30",
            Self::H1 => "h1",
        }
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "m1" | "1m" => Ok(Self::M1),
            "m5" | "5m" => Ok(Self::M5),
            "m15" | "15m" => Ok(Self::M15),
            "m30" | "30m" => Ok(Self::M30),
            "h1" | "1h" | "60m" => Ok(Self::H1),
            _ => Err(anyhow!(
                "Invalid timeframe: '{}'. Valid values: m1, m5, m15, m30, h1",
                s
            )),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
