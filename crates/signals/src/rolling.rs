//! Windowed statistics over numeric series.
//!
//! [`rolling`] is the batch form: one output per input with an
//! expanding-then-fixed window and a warm-up. [`RollingWindow`] is the
//! incremental form used where a computation needs "the window as of the
//! previous bar" without slicing tricks.

use std::collections::VecDeque;

/// Statistic applied to each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollingOp {
    Mean,
    Max,
    Min,
}

/// Applies `op` over a trailing window ending at each index.
///
/// For index `i` the window is `series[max(0, i + 1 - window) ..= i]`. The
/// result is `None` until the window holds at least `min_periods` values.
/// A zero-length window never holds anything, so every output is `None`.
#[must_use]
pub fn rolling(
    series: &[f64],
    window: usize,
    min_periods: usize,
    op: RollingOp,
) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; series.len()];
    }
    let mut state = RollingWindow::new(window, min_periods, op);
    series
        .iter()
        .map(|&value| {
            state.push(value);
            state.value()
        })
        .collect()
}

/// Trailing mean with warm-up.
#[must_use]
pub fn rolling_mean(series: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    rolling(series, window, min_periods, RollingOp::Mean)
}

/// Trailing maximum with warm-up.
#[must_use]
pub fn rolling_max(series: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    rolling(series, window, min_periods, RollingOp::Max)
}

/// Trailing minimum with warm-up.
#[must_use]
pub fn rolling_min(series: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    rolling(series, window, min_periods, RollingOp::Min)
}

/// Incremental fixed-capacity window.
///
/// Mean is summed over the current contents on each read; max and min use
/// a monotonic deque of `(position, value)` so each push is amortised O(1).
#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    min_periods: usize,
    op: RollingOp,
    values: VecDeque<f64>,
    extrema: VecDeque<(usize, f64)>,
    pushed: usize,
}

impl RollingWindow {
    /// Creates an empty window.
    ///
    /// A `capacity` of 0 is treated as 1; a `min_periods` of 0 behaves like 1
    /// since an empty window has no statistic.
    #[must_use]
    pub fn new(capacity: usize, min_periods: usize, op: RollingOp) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            min_periods: min_periods.max(1),
            op,
            values: VecDeque::with_capacity(capacity),
            extrema: VecDeque::new(),
            pushed: 0,
        }
    }

    /// Adds the next value, evicting the oldest once the window is full.
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);

        let position = self.pushed;
        self.pushed += 1;

        match self.op {
            RollingOp::Mean => {}
            RollingOp::Max => {
                while self.extrema.back().is_some_and(|&(_, v)| v <= value) {
                    self.extrema.pop_back();
                }
                self.extrema.push_back((position, value));
            }
            RollingOp::Min => {
                while self.extrema.back().is_some_and(|&(_, v)| v >= value) {
                    self.extrema.pop_back();
                }
                self.extrema.push_back((position, value));
            }
        }

        let oldest = self.pushed.saturating_sub(self.capacity);
        while self.extrema.front().is_some_and(|&(pos, _)| pos < oldest) {
            self.extrema.pop_front();
        }
    }

    /// Current statistic, or `None` while still warming up.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self) -> Option<f64> {
        if self.values.len() < self.min_periods {
            return None;
        }
        match self.op {
            RollingOp::Mean => {
                Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
            }
            RollingOp::Max | RollingOp::Min => self.extrema.front().map(|&(_, v)| v),
        }
    }
}
