//! Ratio mean-reversion backtesting and technical indicator
//! snapshots for a pair of related commodities.
//!
//! Hexagonal architecture: pure computation in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], and [`pipeline`]
//! wiring them together.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod pipeline;
