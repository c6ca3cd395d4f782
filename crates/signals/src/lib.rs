//! Institutional signal computation over OHLCV bar batches.
//!
//! Leaves first: [`rolling`] windowed statistics, [`session`] weighting,
//! [`liquidity_trap`] sweep detection, [`cross_asset`] lagged delta,
//! [`features`] volume/range ratios, and [`composer`] scoring. The
//! [`pipeline`] module wires them into one batch transform.

pub mod composer;
pub mod cross_asset;
pub mod features;
pub mod liquidity_trap;
pub mod pipeline;
pub mod rolling;
pub mod session;
pub mod summary;

pub use composer::{classify, composite, normalize_to_unit, FeatureChannels, SignalComposer};
pub use cross_asset::{cross_asset_delta, dxy_delta, has_auxiliary_series};
pub use features::BaseFeatures;
pub use liquidity_trap::{classify_sweep, liquidity_trap, PriorSwing, SwingTracker};
pub use pipeline::{process_bars, SignalPipeline};
pub use rolling::{rolling, rolling_max, rolling_mean, rolling_min, RollingOp, RollingWindow};
pub use session::{session_index, Session};
pub use summary::{LatestReading, SignalSummary};
