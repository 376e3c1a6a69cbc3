//! RSI (Relative Strength Index) indicator.
//!
//! Uses simple rolling means for average gain/loss over the last n price
//! changes (not Wilder's smoothing):
//! - gain = max(change, 0), loss = max(-change, 0)
//! - RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! Degenerate windows resolve to fixed values:
//! - avg_loss == 0 and avg_gain > 0: RSI = 100
//! - avg_loss == 0 and avg_gain == 0 (flat window): RSI = 50
//!
//! Warmup: n price changes are needed, so the first n points have no value.

use crate::domain::indicator::rolling::RollingStats;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::series::TimeSeries;

pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI from average gain and average loss. NaN in either input yields NaN.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        return f64::NAN;
    }
    // Window means of non-negative values can round a hair below zero.
    let (avg_gain, avg_loss) = (avg_gain.max(0.0), avg_loss.max(0.0));
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }
    100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
}

/// Streaming RSI over the last `period` close-to-close changes.
#[derive(Debug, Clone)]
pub struct RsiAccumulator {
    prev_close: Option<f64>,
    gains: RollingStats,
    losses: RollingStats,
}

impl RsiAccumulator {
    pub fn new(period: usize) -> Self {
        Self {
            prev_close: None,
            gains: RollingStats::new(period),
            losses: RollingStats::new(period),
        }
    }

    pub fn push(&mut self, close: f64) {
        if let Some(prev) = self.prev_close {
            let change = close - prev;
            let (gain, loss) = if change.is_nan() {
                (f64::NAN, f64::NAN)
            } else if change > 0.0 {
                (change, 0.0)
            } else if change < 0.0 {
                (0.0, -change)
            } else {
                (0.0, 0.0)
            };
            self.gains.push(gain);
            self.losses.push(loss);
        }
        self.prev_close = Some(close);
    }

    /// Number of price changes currently in the window.
    pub fn changes(&self) -> usize {
        self.gains.len()
    }

    pub fn value(&self) -> Option<f64> {
        let avg_gain = self.gains.mean()?;
        let avg_loss = self.losses.mean()?;
        Some(rsi_from_averages(avg_gain, avg_loss))
    }
}

pub fn calculate_rsi(closes: &TimeSeries<f64>, period: usize) -> IndicatorSeries {
    let mut acc = RsiAccumulator::new(period);
    let values = closes
        .iter()
        .map(|&(date, close)| {
            acc.push(close);
            IndicatorPoint {
                date,
                value: acc.value().map(IndicatorValue::Simple),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}
