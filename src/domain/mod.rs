//! Core domain types and logic. Pure functions only: no I/O, no logging.

pub mod series;
pub mod price_bar;
pub mod indicator;
pub mod technical;
pub mod backtest;
pub mod metrics;
pub mod analysis;
pub mod config_validation;
pub mod error;
