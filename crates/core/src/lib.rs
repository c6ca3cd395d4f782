//! Core types for the institutional signal pipeline: bars, timeframes,
//! configuration, and error values shared by every crate in the workspace.

pub mod bar;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod time;
pub mod timeframe;

pub use bar::{Bar, BarTime, ProcessedBar, RawBar, SignalClass};
pub use config::{
    ClassificationThresholds, CompositeWeights, CrossAssetConfig, LiquidityTrapConfig,
    NormalizationBounds, RollingConfig, SessionWeights, SignalConfig, TimeframeLookbacks,
};
pub use config_loader::ConfigLoader;
pub use error::{ConfigError, PipelineError};
pub use time::parse_bar_time;
pub use timeframe::Timeframe;
