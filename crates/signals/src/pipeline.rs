//! Batch orchestration: raw bars in, processed bars out.
//!
//! The pipeline is a pure function of its input and configuration. It either
//! returns one processed bar per input bar, in ascending time order, or fails
//! before producing anything.

use crate::composer::{FeatureChannels, SignalComposer};
use crate::cross_asset::cross_asset_delta;
use crate::features::BaseFeatures;
use crate::liquidity_trap::liquidity_trap;
use crate::session::Session;
use insti_signal_core::{
    parse_bar_time, Bar, ConfigError, PipelineError, ProcessedBar, RawBar, SignalConfig, Timeframe,
};

/// Configured signal pipeline.
#[derive(Debug, Clone, Default)]
pub struct SignalPipeline {
    config: SignalConfig,
}

impl SignalPipeline {
    /// Creates a pipeline after validating `config`.
    ///
    /// # Errors
    /// Returns the validation failure if any parameter is unusable.
    pub fn new(config: SignalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Runs the full transform over one batch.
    ///
    /// # Errors
    /// - [`PipelineError::EmptyInput`] if `raw` is empty.
    /// - [`PipelineError::InvalidTimeFormat`] if any bar's time cannot be
    ///   parsed; the whole batch is rejected.
    pub fn process(
        &self,
        raw: &[RawBar],
        timeframe: Timeframe,
    ) -> Result<Vec<ProcessedBar>, PipelineError> {
        let bars = normalize_bars(raw)?;
        let lookback = self.config.lookbacks.for_timeframe(timeframe);

        tracing::debug!(
            bars = bars.len(),
            %timeframe,
            lookback,
            "Computing signal features"
        );

        let base = BaseFeatures::compute(&bars, &self.config.rolling);
        let traps = liquidity_trap(&bars, lookback, &self.config.liquidity_trap);
        let dxy = cross_asset_delta(&bars, self.config.cross_asset.lag);

        let composer = SignalComposer::new(
            self.config.weights,
            self.config.normalization,
            self.config.thresholds,
        );

        let processed: Vec<ProcessedBar> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let channels = FeatureChannels {
                    dv: base.dv[i],
                    dp: base.dp[i],
                    session_index: Session::at(&bar.time).weight(&self.config.sessions),
                    liq_trap: traps[i],
                    dxy_delta: dxy[i],
                };
                let (institution_signal, signal_class) = composer.score(&channels);

                ProcessedBar {
                    time: bar.time,
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                    dxy_delta: channels.dxy_delta,
                    dv: channels.dv,
                    dp: channels.dp,
                    session_index: channels.session_index,
                    liq_trap: channels.liq_trap,
                    institution_signal,
                    signal_class,
                }
            })
            .collect();

        tracing::info!(
            bars = processed.len(),
            %timeframe,
            "Processed signal batch"
        );

        Ok(processed)
    }
}

/// Processes a batch with the default configuration.
///
/// # Errors
/// See [`SignalPipeline::process`].
pub fn process_bars(
    raw: &[RawBar],
    timeframe: Timeframe,
) -> Result<Vec<ProcessedBar>, PipelineError> {
    SignalPipeline::default().process(raw, timeframe)
}

/// Parses every timestamp and stable-sorts ascending by time.
///
/// All-or-nothing: one unparseable time rejects the batch.
fn normalize_bars(raw: &[RawBar]) -> Result<Vec<Bar>, PipelineError> {
    if raw.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let mut bars = raw
        .iter()
        .map(|r| {
            Ok(Bar {
                time: parse_bar_time(&r.time)?,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                volume: r.volume,
                dxy: r.dxy,
            })
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    bars.sort_by_key(|b| b.time);
    Ok(bars)
}
