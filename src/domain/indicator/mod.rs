//! Full-series indicators over close prices.
//!
//! Each `calculate_*` function returns an [`IndicatorSeries`] with one
//! [`IndicatorPoint`] per close; points still inside the warm-up window carry
//! `None`. [`IndicatorType`] names the indicator and its parameters and can be
//! used as a map key. All series are built in one pass with the accumulators
//! in [`rolling`].

pub mod rolling;
pub mod sma;
pub mod stddev;
pub mod rsi;
pub mod bollinger;
pub mod range;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<IndicatorValue>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndicatorValue {
    Simple(f64),
    Bollinger { upper: f64, middle: f64, lower: f64 },
    Range { support: f64, resistance: f64 },
}

impl IndicatorValue {
    pub fn as_simple(&self) -> Option<f64> {
        match self {
            IndicatorValue::Simple(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndicatorType {
    Sma(usize),
    Stddev(usize),
    Rsi(usize),
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Range(usize),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value at the last observation, if it is past warm-up.
    pub fn last_value(&self) -> Option<IndicatorValue> {
        self.values.last().and_then(|p| p.value)
    }

    /// Number of points past warm-up.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|p| p.value.is_some()).count()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::Range(period) => write!(f, "RANGE({})", period),
        }
    }
}
