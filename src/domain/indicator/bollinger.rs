//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is the sample standard deviation (divides by N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) points have no value.

use crate::domain::indicator::rolling::RollingStats;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::series::TimeSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    pub fn new(middle: f64, std_dev: f64, mult: f64) -> Self {
        Self {
            upper: middle + mult * std_dev,
            middle,
            lower: middle - mult * std_dev,
        }
    }

    /// Bands from a full window, or `None` during warm-up.
    pub fn from_stats(stats: &RollingStats, mult: f64) -> Option<Self> {
        let middle = stats.mean()?;
        let std_dev = stats.sample_std_dev()?;
        Some(Self::new(middle, std_dev, mult))
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl From<BollingerBands> for IndicatorValue {
    fn from(bands: BollingerBands) -> Self {
        IndicatorValue::Bollinger {
            upper: bands.upper,
            middle: bands.middle,
            lower: bands.lower,
        }
    }
}

pub fn calculate_bollinger(
    closes: &TimeSeries<f64>,
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let mult = stddev_mult_x100 as f64 / 100.0;
    let mut stats = RollingStats::new(period);

    let values = closes
        .iter()
        .map(|&(date, close)| {
            stats.push(close);
            IndicatorPoint {
                date,
                value: BollingerBands::from_stats(&stats, mult).map(IndicatorValue::from),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger {
            period,
            stddev_mult_x100,
        },
        values,
    }
}
