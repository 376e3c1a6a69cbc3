//! Close-only price observation.

use crate::domain::series::TimeSeries;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// (close - prev_close) / prev_close
    pub fn change_from(&self, prev_close: f64) -> f64 {
        (self.close - prev_close) / prev_close
    }
}

/// Close prices keyed by date. Bars may arrive in any order.
pub fn close_series(bars: &[PriceBar]) -> TimeSeries<f64> {
    TimeSeries::from_points(bars.iter().map(|b| (b.date, b.close)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), close)
    }

    #[test]
    fn change_from_previous_close() {
        // (110 - 100) / 100 = 0.1
        assert!((bar(2, 110.0).change_from(100.0) - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn close_series_sorts_bars() {
        let bars = vec![bar(3, 103.0), bar(1, 101.0), bar(2, 102.0)];
        let series = close_series(&bars);

        let closes: Vec<f64> = series.values().copied().collect();
        assert_eq!(closes, vec![101.0, 102.0, 103.0]);
    }

    #[test]
    fn close_series_empty() {
        assert!(close_series(&[]).is_empty());
    }
}
