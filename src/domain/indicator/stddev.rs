//! Standard Deviation indicator.
//!
//! Sample standard deviation over n closing prices.
//! STDDEV(n)[i] = sqrt(sum((C[i-j] - SMA(n)[i])^2 for j in 0..n-1) / (n - 1))
//! Warmup: first (n-1) points have no value. Undefined for n < 2.

use crate::domain::indicator::rolling::RollingStats;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::series::TimeSeries;

pub fn calculate_stddev(closes: &TimeSeries<f64>, period: usize) -> IndicatorSeries {
    let mut stats = RollingStats::new(period);
    let values = closes
        .iter()
        .map(|&(date, close)| {
            stats.push(close);
            IndicatorPoint {
                date,
                value: stats.sample_std_dev().map(IndicatorValue::Simple),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Stddev(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_series(prices: &[f64]) -> TimeSeries<f64> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                (
                    NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                    close,
                )
            })
            .collect()
    }

    fn simple(series: &IndicatorSeries, i: usize) -> f64 {
        series.values[i]
            .value
            .and_then(|v| v.as_simple())
            .expect("expected a Simple value")
    }

    #[test]
    fn stddev_warmup() {
        let series = calculate_stddev(&make_series(&[10.0, 20.0, 30.0, 40.0, 50.0]), 3);

        assert!(series.values[0].value.is_none());
        assert!(series.values[1].value.is_none());
        assert!(series.values[2].value.is_some());
        assert!(series.values[4].value.is_some());
    }

    #[test]
    fn stddev_constant_values() {
        let series = calculate_stddev(&make_series(&[100.0; 5]), 3);
        assert_eq!(simple(&series, 2), 0.0);
        assert_eq!(simple(&series, 4), 0.0);
    }

    #[test]
    fn stddev_known_values() {
        // Sample variance of [2,4,4,4,5,5,7,9] is 32/7.
        let series = calculate_stddev(&make_series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 8);
        assert_relative_eq!(simple(&series, 7), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn stddev_period_one_is_undefined() {
        let series = calculate_stddev(&make_series(&[1.0, 2.0]), 1);
        assert_eq!(series.valid_count(), 0);
    }

    #[test]
    fn stddev_indicator_type() {
        let series = calculate_stddev(&make_series(&[10.0, 20.0, 30.0]), 5);
        assert_eq!(series.indicator_type, IndicatorType::Stddev(5));
    }
}
