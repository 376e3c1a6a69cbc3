//! Indicator snapshot engine.
//!
//! Summarises a close-price series into trend, momentum, volatility and range
//! metrics as of its last observation. The series is streamed once through
//! fixed-size accumulators; a metric whose window is not yet filled is
//! reported as [`Metric::InsufficientWindow`] while the others are still
//! returned.

use crate::domain::indicator::bollinger::BollingerBands;
use crate::domain::indicator::rolling::{RollingExtremes, RollingStats};
use crate::domain::indicator::rsi::RsiAccumulator;
use crate::domain::series::TimeSeries;
use chrono::NaiveDate;
use std::fmt;

pub const DEFAULT_MA_SHORT: usize = 20;
pub const DEFAULT_MA_LONG: usize = 60;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULT: f64 = 2.0;
pub const DEFAULT_RANGE_PERIOD: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub ma_short: usize,
    pub ma_long: usize,
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_mult: f64,
    pub range_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_short: DEFAULT_MA_SHORT,
            ma_long: DEFAULT_MA_LONG,
            rsi_period: DEFAULT_RSI_PERIOD,
            bollinger_period: DEFAULT_BOLLINGER_PERIOD,
            bollinger_mult: DEFAULT_BOLLINGER_MULT,
            range_period: DEFAULT_RANGE_PERIOD,
        }
    }
}

/// A point value that needs a minimum number of observations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Metric<T> {
    Ready(T),
    InsufficientWindow { required: usize, available: usize },
}

impl<T> Metric<T> {
    fn from_option(value: Option<T>, required: usize, available: usize) -> Self {
        match value {
            Some(v) => Metric::Ready(v),
            None => Metric::InsufficientWindow {
                required,
                available,
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Metric::Ready(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Metric::Ready(v) => Some(v),
            Metric::InsufficientWindow { .. } => None,
        }
    }
}

impl<T: Copy> Metric<T> {
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    /// Bullish only when the short average is strictly above the long one.
    /// Ties, and NaN on either side, are Bearish.
    pub fn from_averages(short: f64, long: f64) -> Self {
        if short > long {
            Trend::Bullish
        } else {
            Trend::Bearish
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "Bullish"),
            Trend::Bearish => write!(f, "Bearish"),
        }
    }
}

/// Lowest and highest close over the trailing range window. With fewer
/// closes than the window, covers every close seen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceRange {
    pub support: f64,
    pub resistance: f64,
    pub observations: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndicatorSnapshot {
    pub as_of: NaiveDate,
    pub observations: usize,
    pub latest_close: f64,
    pub ma_short: Metric<f64>,
    pub ma_long: Metric<f64>,
    pub trend: Metric<Trend>,
    pub rsi: Metric<f64>,
    pub bollinger: Metric<BollingerBands>,
    pub range: PriceRange,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndicatorReport {
    EmptyInput,
    Snapshot(IndicatorSnapshot),
}

impl IndicatorReport {
    pub fn snapshot(&self) -> Option<&IndicatorSnapshot> {
        match self {
            IndicatorReport::Snapshot(s) => Some(s),
            IndicatorReport::EmptyInput => None,
        }
    }
}

/// Streaming indicator state. Feed closes in date order, then read a
/// snapshot at any point.
#[derive(Debug, Clone)]
pub struct TechnicalState {
    config: IndicatorConfig,
    ma_short: RollingStats,
    ma_long: RollingStats,
    bands: RollingStats,
    rsi: RsiAccumulator,
    range: RollingExtremes,
    observations: usize,
    last: Option<(NaiveDate, f64)>,
}

impl TechnicalState {
    pub fn new(config: &IndicatorConfig) -> Self {
        Self {
            config: config.clone(),
            ma_short: RollingStats::new(config.ma_short),
            ma_long: RollingStats::new(config.ma_long),
            bands: RollingStats::new(config.bollinger_period),
            rsi: RsiAccumulator::new(config.rsi_period),
            range: RollingExtremes::new(config.range_period),
            observations: 0,
            last: None,
        }
    }

    pub fn update(&mut self, date: NaiveDate, close: f64) {
        self.ma_short.push(close);
        self.ma_long.push(close);
        self.bands.push(close);
        self.rsi.push(close);
        self.range.push(close);
        self.observations += 1;
        self.last = Some((date, close));
    }

    pub fn snapshot(&self) -> IndicatorReport {
        let Some((as_of, latest_close)) = self.last else {
            return IndicatorReport::EmptyInput;
        };
        let n = self.observations;
        let cfg = &self.config;

        let ma_short = Metric::from_option(self.ma_short.mean(), cfg.ma_short, n);
        let ma_long = Metric::from_option(self.ma_long.mean(), cfg.ma_long, n);
        let trend = Metric::from_option(
            ma_short
                .get()
                .zip(ma_long.get())
                .map(|(short, long)| Trend::from_averages(short, long)),
            cfg.ma_short.max(cfg.ma_long),
            n,
        );
        let rsi = Metric::from_option(self.rsi.value(), cfg.rsi_period + 1, n);
        let bollinger = Metric::from_option(
            BollingerBands::from_stats(&self.bands, cfg.bollinger_mult),
            cfg.bollinger_period,
            n,
        );
        let range = PriceRange {
            support: self.range.min().unwrap_or(latest_close),
            resistance: self.range.max().unwrap_or(latest_close),
            observations: self.range.len(),
        };

        IndicatorReport::Snapshot(IndicatorSnapshot {
            as_of,
            observations: n,
            latest_close,
            ma_short,
            ma_long,
            trend,
            rsi,
            bollinger,
            range,
        })
    }
}

/// Indicator snapshot with the default windows (MA 20/60, RSI 14,
/// Bollinger 20 ± 2σ, 30-period range).
pub fn compute_indicators(closes: &TimeSeries<f64>) -> IndicatorReport {
    compute_indicators_with(closes, &IndicatorConfig::default())
}

pub fn compute_indicators_with(
    closes: &TimeSeries<f64>,
    config: &IndicatorConfig,
) -> IndicatorReport {
    let mut state = TechnicalState::new(config);
    for &(date, close) in closes {
        state.update(date, close);
    }
    state.snapshot()
}
