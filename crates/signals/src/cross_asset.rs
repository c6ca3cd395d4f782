//! Lagged delta of an auxiliary index series (DXY).

use insti_signal_core::Bar;

/// Difference between each reading and the one `lag` bars earlier.
///
/// Positions without both readings, and the first `lag` positions, yield
/// 0.0 so the channel contributes nothing to the composite there.
#[must_use]
pub fn dxy_delta(series: &[Option<f64>], lag: usize) -> Vec<f64> {
    series
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let earlier = i.checked_sub(lag).and_then(|j| series[j]);
            match (*current, earlier) {
                (Some(now), Some(then)) => now - then,
                _ => 0.0,
            }
        })
        .collect()
}

/// Whether any bar in the batch carries an auxiliary reading.
#[must_use]
pub fn has_auxiliary_series(bars: &[Bar]) -> bool {
    bars.iter().any(|b| b.dxy.is_some())
}

/// Cross-asset delta for a sorted batch.
///
/// Presence of the auxiliary series is decided once for the whole batch;
/// without it every bar gets 0.0.
#[must_use]
pub fn cross_asset_delta(bars: &[Bar], lag: usize) -> Vec<f64> {
    if !has_auxiliary_series(bars) {
        tracing::debug!("No auxiliary series in batch, cross-asset delta disabled");
        return vec![0.0; bars.len()];
    }

    let series: Vec<Option<f64>> = bars.iter().map(|b| b.dxy).collect();
    let missing = series.iter().filter(|v| v.is_none()).count();
    if missing > 0 {
        tracing::warn!(
            missing,
            total = bars.len(),
            "Auxiliary series has gaps, affected deltas fall back to 0.0"
        );
    }

    dxy_delta(&series, lag)
}
