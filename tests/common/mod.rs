#![allow(dead_code)]

use chrono::NaiveDate;
use ratioquant::domain::error::QuantError;
pub use ratioquant::domain::price_bar::PriceBar;
use ratioquant::domain::series::TimeSeries;
use ratioquant::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriceBar>, QuantError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(QuantError::DataSource {
                reason: reason.clone(),
            });
        }
        let bars = self.data.get(symbol).ok_or_else(|| QuantError::NoData {
            symbol: symbol.to_string(),
        })?;
        Ok(bars
            .iter()
            .filter(|b| start_date.is_none_or(|start| b.date >= start))
            .filter(|b| end_date.is_none_or(|end| b.date <= end))
            .cloned()
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, QuantError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn day(offset: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset as i64)
}

/// Consecutive daily points starting 2024-01-01.
pub fn make_series(values: &[f64]) -> TimeSeries<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (day(i), v))
        .collect()
}

pub fn make_bars(values: &[f64]) -> Vec<PriceBar> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| PriceBar::new(day(i), v))
        .collect()
}

/// Deterministic wave with drift, for long realistic-looking series.
pub fn wave(n: usize, base: f64, amplitude: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            base + amplitude * (t / 7.0).sin() + 0.05 * t
        })
        .collect()
}
