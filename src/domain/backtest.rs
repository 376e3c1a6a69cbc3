//! Ratio threshold-crossing backtest.
//!
//! 1. Align the ratio and target-price series on date.
//! 2. Emit a signal at each strict crossing of the threshold in the
//!    configured direction (edge-triggered; index 0 never signals).
//! 3. For each signal at index i with i + holding_period inside the aligned
//!    series, enter at price[i] and exit at price[i + holding_period].
//!    Signals without enough lookahead are dropped.
//! 4. Aggregate the realized trades.
//!
//! Overlapping signals each open their own independent trade; there is no
//! position netting or capital allocation.

use crate::domain::metrics::TradeMetrics;
use crate::domain::series::{AlignedPair, TimeSeries, align};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_HOLDING_PERIOD: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    /// True when the ratio moves from the non-triggering side (or exactly on
    /// the threshold) to strictly past it between two observations.
    pub fn crossed(self, previous: f64, current: f64, threshold: f64) -> bool {
        match self {
            Direction::Above => current > threshold && previous <= threshold,
            Direction::Below => current < threshold && previous >= threshold,
        }
    }

    /// True when `value` is strictly on the triggering side.
    pub fn is_triggered(self, value: f64, threshold: f64) -> bool {
        match self {
            Direction::Above => value > threshold,
            Direction::Below => value < threshold,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" => Ok(Direction::Above),
            "below" => Ok(Direction::Below),
            other => Err(format!("unknown direction '{}', expected above or below", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Above => write!(f, "above"),
            Direction::Below => write!(f, "below"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub threshold: f64,
    pub direction: Direction,
    pub holding_period: usize,
}

impl BacktestConfig {
    pub fn new(threshold: f64, direction: Direction) -> Self {
        Self {
            threshold,
            direction,
            holding_period: DEFAULT_HOLDING_PERIOD,
        }
    }

    pub fn with_holding_period(mut self, holding_period: usize) -> Self {
        self.holding_period = holding_period;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SignalEvent {
    /// Position in the aligned series.
    pub index: usize,
    pub date: NaiveDate,
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Trade {
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    /// (exit - entry) / entry, as a fraction.
    pub realized_return: f64,
}

impl Trade {
    pub fn new(
        entry_date: NaiveDate,
        exit_date: NaiveDate,
        entry_price: f64,
        exit_price: f64,
    ) -> Self {
        Self {
            entry_date,
            exit_date,
            entry_price,
            exit_price,
            realized_return: (exit_price - entry_price) / entry_price,
        }
    }

    pub fn is_win(&self) -> bool {
        self.realized_return > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BacktestResult {
    /// Number of realized trades.
    pub signal_count: usize,
    /// Percentage of trades with a strictly positive return.
    pub win_rate: f64,
    pub avg_return: f64,
    pub max_return: f64,
    pub min_return: f64,
    /// Every crossing found, including those too close to the end to trade.
    pub signals_detected: usize,
    pub metrics: TradeMetrics,
    pub trades: Vec<Trade>,
}

impl BacktestResult {
    pub fn from_trades(signals_detected: usize, trades: Vec<Trade>) -> Self {
        let metrics = TradeMetrics::compute(&trades);
        Self {
            signal_count: metrics.total_trades,
            win_rate: metrics.win_rate,
            avg_return: metrics.avg_return,
            max_return: metrics.max_return,
            min_return: metrics.min_return,
            signals_detected,
            metrics,
            trades,
        }
    }

    /// A valid run that produced no trades.
    pub fn is_zero_signal(&self) -> bool {
        self.signal_count == 0
    }

    /// Signals dropped for lack of lookahead.
    pub fn signals_without_exit(&self) -> usize {
        self.signals_detected - self.signal_count
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BacktestOutcome {
    /// One or both inputs were empty before alignment.
    EmptyInput,
    /// Both inputs had data but no common dates.
    NoAlignedData,
    Completed(BacktestResult),
}

impl BacktestOutcome {
    pub fn result(&self) -> Option<&BacktestResult> {
        match self {
            BacktestOutcome::Completed(r) => Some(r),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            BacktestOutcome::EmptyInput => "no data",
            BacktestOutcome::NoAlignedData => "no aligned data",
            BacktestOutcome::Completed(_) => "completed",
        }
    }
}

/// Crossings of the threshold, with `aligned.left` holding the ratio.
pub fn detect_signals(aligned: &AlignedPair, config: &BacktestConfig) -> Vec<SignalEvent> {
    aligned
        .left
        .windows(2)
        .enumerate()
        .filter(|(_, w)| config.direction.crossed(w[0], w[1], config.threshold))
        .map(|(i, w)| SignalEvent {
            index: i + 1,
            date: aligned.dates[i + 1],
            ratio: w[1],
        })
        .collect()
}

/// Trades for each signal with an exit inside the series, with
/// `aligned.right` holding the target price.
pub fn simulate_trades(
    aligned: &AlignedPair,
    signals: &[SignalEvent],
    holding_period: usize,
) -> Vec<Trade> {
    signals
        .iter()
        .filter_map(|signal| {
            let exit = signal.index.checked_add(holding_period)?;
            if exit >= aligned.len() {
                return None;
            }
            Some(Trade::new(
                aligned.dates[signal.index],
                aligned.dates[exit],
                aligned.right[signal.index],
                aligned.right[exit],
            ))
        })
        .collect()
}

pub fn run_backtest(
    ratio: &TimeSeries<f64>,
    target_price: &TimeSeries<f64>,
    config: &BacktestConfig,
) -> BacktestOutcome {
    if ratio.is_empty() || target_price.is_empty() {
        return BacktestOutcome::EmptyInput;
    }

    let aligned = align(ratio, target_price);
    if aligned.is_empty() {
        return BacktestOutcome::NoAlignedData;
    }

    let signals = detect_signals(&aligned, config);
    let trades = simulate_trades(&aligned, &signals, config.holding_period);

    BacktestOutcome::Completed(BacktestResult::from_trades(signals.len(), trades))
}

/// The latest ratio and whether it currently sits on the triggering side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RatioReading {
    pub date: NaiveDate,
    pub ratio: f64,
    pub signal_active: bool,
}

pub fn current_signal(ratio: &TimeSeries<f64>, config: &BacktestConfig) -> Option<RatioReading> {
    ratio.last().map(|&(date, value)| RatioReading {
        date,
        ratio: value,
        signal_active: config.direction.is_triggered(value, config.threshold),
    })
}
