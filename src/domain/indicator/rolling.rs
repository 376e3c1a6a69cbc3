//! Fixed-size sliding-window accumulators with O(1) amortised updates.
//! `RollingStats` reads its window in two passes.
//!
//! Non-finite inputs are tracked rather than folded into the running state:
//! while any NaN or infinity sits in the window the accumulator reports NaN,
//! and it recovers once that value slides out.

use std::collections::VecDeque;

/// Mean and sample variance over the last `period` values.
///
/// `push` is O(1). Reads make two passes over the window, measuring
/// deviations from the oldest value first, so a constant window reports its
/// value exactly with zero deviation.
#[derive(Debug, Clone)]
pub struct RollingStats {
    period: usize,
    window: VecDeque<f64>,
    non_finite: usize,
}

impl RollingStats {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: VecDeque::with_capacity(period),
            non_finite: 0,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.period > 0 && self.window.len() == self.period
    }

    pub fn push(&mut self, value: f64) {
        if self.period == 0 {
            return;
        }
        if self.window.len() == self.period {
            if let Some(oldest) = self.window.pop_front() {
                if !oldest.is_finite() {
                    self.non_finite -= 1;
                }
            }
        }
        if !value.is_finite() {
            self.non_finite += 1;
        }
        self.window.push_back(value);
    }

    /// Arithmetic mean of the window, or `None` until the window is full.
    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        if self.non_finite > 0 {
            return Some(f64::NAN);
        }
        let pivot = self.window.front().copied()?;
        let shift: f64 = self.window.iter().map(|v| v - pivot).sum();
        Some(pivot + shift / self.period as f64)
    }

    /// Sample (n - 1) standard deviation of the window, or `None` until the
    /// window is full. Undefined for a period below 2.
    pub fn sample_std_dev(&self) -> Option<f64> {
        if self.period < 2 {
            return None;
        }
        let mean = self.mean()?;
        if mean.is_nan() {
            return Some(f64::NAN);
        }
        let squares: f64 = self.window.iter().map(|v| (v - mean).powi(2)).sum();
        Some((squares / (self.period - 1) as f64).sqrt())
    }
}

/// Minimum and maximum over the last `period` values via monotonic deques.
#[derive(Debug, Clone)]
pub struct RollingExtremes {
    period: usize,
    seen: u64,
    len: usize,
    mins: VecDeque<(u64, f64)>,
    maxs: VecDeque<(u64, f64)>,
    non_finite: VecDeque<u64>,
}

impl RollingExtremes {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            seen: 0,
            len: 0,
            mins: VecDeque::new(),
            maxs: VecDeque::new(),
            non_finite: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.period > 0 && self.len == self.period
    }

    pub fn push(&mut self, value: f64) {
        if self.period == 0 {
            return;
        }
        let index = self.seen;
        self.seen += 1;
        self.len = (self.len + 1).min(self.period);

        let window_start = index + 1 - self.len as u64;
        while self.mins.front().is_some_and(|&(i, _)| i < window_start) {
            self.mins.pop_front();
        }
        while self.maxs.front().is_some_and(|&(i, _)| i < window_start) {
            self.maxs.pop_front();
        }
        while self.non_finite.front().is_some_and(|&i| i < window_start) {
            self.non_finite.pop_front();
        }

        if !value.is_finite() {
            self.non_finite.push_back(index);
            return;
        }

        while self.mins.back().is_some_and(|&(_, v)| v >= value) {
            self.mins.pop_back();
        }
        self.mins.push_back((index, value));

        while self.maxs.back().is_some_and(|&(_, v)| v <= value) {
            self.maxs.pop_back();
        }
        self.maxs.push_back((index, value));
    }

    /// Smallest value currently in the window (which may be partially filled).
    pub fn min(&self) -> Option<f64> {
        self.extreme(&self.mins)
    }

    /// Largest value currently in the window (which may be partially filled).
    pub fn max(&self) -> Option<f64> {
        self.extreme(&self.maxs)
    }

    fn extreme(&self, deque: &VecDeque<(u64, f64)>) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        if !self.non_finite.is_empty() {
            return Some(f64::NAN);
        }
        deque.front().map(|&(_, v)| v)
    }
}
