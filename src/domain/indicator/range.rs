//! Rolling trading range (support / resistance).
//!
//! RANGE(n)[i] = (min(C[i-n+1..=i]), max(C[i-n+1..=i]))
//! Warmup: first (n-1) points have no value.

use crate::domain::indicator::rolling::RollingExtremes;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::series::TimeSeries;

pub fn calculate_range(closes: &TimeSeries<f64>, period: usize) -> IndicatorSeries {
    let mut extremes = RollingExtremes::new(period);
    let values = closes
        .iter()
        .map(|&(date, close)| {
            extremes.push(close);
            let value = match (extremes.is_full(), extremes.min(), extremes.max()) {
                (true, Some(support), Some(resistance)) => Some(IndicatorValue::Range {
                    support,
                    resistance,
                }),
                _ => None,
            };
            IndicatorPoint { date, value }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Range(period),
        values,
    }
}
