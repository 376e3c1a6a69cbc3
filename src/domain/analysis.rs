//! Pair analysis: ratio construction plus both engines over one pair of
//! close-price series.

use crate::domain::backtest::{
    self, BacktestConfig, BacktestOutcome, RatioReading, current_signal,
};
use crate::domain::series::{TimeSeries, ratio_of};
use crate::domain::technical::{IndicatorConfig, IndicatorReport, compute_indicators_with};
use std::fmt;
use std::str::FromStr;

/// Which side of the ratio is traded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Leg {
    Numerator,
    Denominator,
}

impl FromStr for Leg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numerator" => Ok(Leg::Numerator),
            "denominator" => Ok(Leg::Denominator),
            other => Err(format!(
                "unknown leg '{}', expected numerator or denominator",
                other
            )),
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Numerator => write!(f, "numerator"),
            Leg::Denominator => write!(f, "denominator"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub backtest: BacktestConfig,
    pub indicators: IndicatorConfig,
    pub target: Leg,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PairAnalysis {
    pub target: Leg,
    pub ratio_points: usize,
    pub latest_ratio: Option<RatioReading>,
    pub technical: IndicatorReport,
    pub backtest: BacktestOutcome,
}

/// Builds `numerator / denominator`, snapshots the target leg's indicators
/// and backtests the ratio against the target leg's price.
pub fn analyze_pair(
    numerator: &TimeSeries<f64>,
    denominator: &TimeSeries<f64>,
    config: &AnalysisConfig,
) -> PairAnalysis {
    let target = match config.target {
        Leg::Numerator => numerator,
        Leg::Denominator => denominator,
    };

    let ratio = ratio_of(numerator, denominator);

    let backtest = if numerator.is_empty() || denominator.is_empty() {
        BacktestOutcome::EmptyInput
    } else if ratio.is_empty() {
        BacktestOutcome::NoAlignedData
    } else {
        backtest::run_backtest(&ratio, target, &config.backtest)
    };

    PairAnalysis {
        target: config.target,
        ratio_points: ratio.len(),
        latest_ratio: current_signal(&ratio, &config.backtest),
        technical: compute_indicators_with(target, &config.indicators),
        backtest,
    }
}
