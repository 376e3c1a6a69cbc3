//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i])
//! Warmup: first (n-1) points have no value.

use crate::domain::indicator::rolling::RollingStats;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::series::TimeSeries;

pub fn calculate_sma(closes: &TimeSeries<f64>, period: usize) -> IndicatorSeries {
    let mut stats = RollingStats::new(period);
    let values = closes
        .iter()
        .map(|&(date, close)| {
            stats.push(close);
            IndicatorPoint {
                date,
                value: stats.mean().map(IndicatorValue::Simple),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}
