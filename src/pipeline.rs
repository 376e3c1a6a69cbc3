//! Config-driven pair analysis.
//!
//! Loads an INI config, validates it, reads both legs through a [`DataPort`]
//! and hands the close series to [`analyze_pair`]. Progress is reported via
//! `tracing`; installing a subscriber is left to the caller.

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::analysis::{AnalysisConfig, Leg, PairAnalysis, analyze_pair};
use crate::domain::backtest::{BacktestConfig, DEFAULT_HOLDING_PERIOD, Direction};
use crate::domain::config_validation::{parse_date, parse_optional, validate_analysis_config};
use crate::domain::error::QuantError;
use crate::domain::price_bar::{PriceBar, close_series};
use crate::domain::technical::{
    DEFAULT_BOLLINGER_MULT, DEFAULT_BOLLINGER_PERIOD, DEFAULT_MA_LONG, DEFAULT_MA_SHORT,
    DEFAULT_RANGE_PERIOD, DEFAULT_RSI_PERIOD, IndicatorConfig,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_THRESHOLD: f64 = 80.0;
pub const DEFAULT_DATA_PATH: &str = "./data";

/// The two legs to load and the optional inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRequest {
    pub numerator: String,
    pub denominator: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, QuantError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

pub fn build_pair_request(config: &dyn ConfigPort) -> Result<PairRequest, QuantError> {
    let numerator = config
        .get_non_empty("pair", "numerator")
        .ok_or_else(|| QuantError::missing("pair", "numerator"))?;
    let denominator = config
        .get_non_empty("pair", "denominator")
        .ok_or_else(|| QuantError::missing("pair", "denominator"))?;

    Ok(PairRequest {
        numerator,
        denominator,
        start_date: parse_date(config, "pair", "start_date")?,
        end_date: parse_date(config, "pair", "end_date")?,
    })
}

pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, QuantError> {
    let target = match config.get_non_empty("pair", "target") {
        Some(raw) => raw
            .parse::<Leg>()
            .map_err(|reason| QuantError::invalid("pair", "target", reason))?,
        None => Leg::Denominator,
    };

    let direction = match config.get_non_empty("backtest", "direction") {
        Some(raw) => raw
            .parse::<Direction>()
            .map_err(|reason| QuantError::invalid("backtest", "direction", reason))?,
        None => Direction::Above,
    };
    let threshold =
        parse_optional::<f64>(config, "backtest", "threshold")?.unwrap_or(DEFAULT_THRESHOLD);
    let holding_period = parse_optional::<usize>(config, "backtest", "holding_period")?
        .unwrap_or(DEFAULT_HOLDING_PERIOD);

    let window = |key: &str, default: usize| -> Result<usize, QuantError> {
        Ok(parse_optional::<usize>(config, "indicators", key)?.unwrap_or(default))
    };
    let indicators = IndicatorConfig {
        ma_short: window("ma_short", DEFAULT_MA_SHORT)?,
        ma_long: window("ma_long", DEFAULT_MA_LONG)?,
        rsi_period: window("rsi_period", DEFAULT_RSI_PERIOD)?,
        bollinger_period: window("bollinger_period", DEFAULT_BOLLINGER_PERIOD)?,
        bollinger_mult: parse_optional::<f64>(config, "indicators", "bollinger_mult")?
            .unwrap_or(DEFAULT_BOLLINGER_MULT),
        range_period: window("range_period", DEFAULT_RANGE_PERIOD)?,
    };

    Ok(AnalysisConfig {
        backtest: BacktestConfig::new(threshold, direction).with_holding_period(holding_period),
        indicators,
        target,
    })
}

/// Directory holding the `<SYMBOL>.csv` files.
pub fn data_path(config: &dyn ConfigPort) -> PathBuf {
    PathBuf::from(
        config
            .get_non_empty("data", "path")
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
    )
}

/// Loads both legs and analyzes the pair. Empty legs are not errors; they
/// surface as `EmptyInput` in the returned analysis.
pub fn run_pair_analysis(
    data: &dyn DataPort,
    request: &PairRequest,
    config: &AnalysisConfig,
) -> Result<PairAnalysis, QuantError> {
    let numerator_bars = fetch_leg(data, &request.numerator, request)?;
    let denominator_bars = fetch_leg(data, &request.denominator, request)?;

    info!(
        numerator = %request.numerator,
        denominator = %request.denominator,
        numerator_bars = numerator_bars.len(),
        denominator_bars = denominator_bars.len(),
        leg = %config.target,
        "analyzing pair"
    );

    let analysis = analyze_pair(
        &close_series(&numerator_bars),
        &close_series(&denominator_bars),
        config,
    );

    if analysis.ratio_points == 0 {
        warn!("no overlapping dates between legs");
    }
    match analysis.backtest.result() {
        Some(result) => info!(
            signals = result.signals_detected,
            trades = result.signal_count,
            win_rate = result.win_rate,
            avg_return = result.avg_return,
            "backtest completed"
        ),
        None => info!(status = analysis.backtest.status(), "backtest skipped"),
    }

    Ok(analysis)
}

/// Loads one leg. On a miss, reports which symbols the source does hold, or
/// the dates it holds for the symbol when the requested range is empty.
fn fetch_leg(
    data: &dyn DataPort,
    symbol: &str,
    request: &PairRequest,
) -> Result<Vec<PriceBar>, QuantError> {
    let bars = match data.fetch_bars(symbol, request.start_date, request.end_date) {
        Err(QuantError::NoData { symbol }) => {
            match data.list_symbols() {
                Ok(available) => warn!(symbol = %symbol, ?available, "symbol not found"),
                Err(e) => warn!(symbol = %symbol, error = %e, "symbol not found"),
            }
            return Err(QuantError::NoData { symbol });
        }
        other => other?,
    };

    if bars.is_empty() {
        match data.get_data_range(symbol)? {
            Some((first, last, count)) => warn!(
                symbol,
                %first,
                %last,
                count,
                "no bars in requested range"
            ),
            None => warn!(symbol, "symbol has no bars"),
        }
    }
    Ok(bars)
}

/// Validates the config at `path`, loads CSV data from its `[data] path`
/// and runs the analysis.
pub fn run_from_config(path: &Path) -> Result<PairAnalysis, QuantError> {
    let config = load_config(path)?;
    validate_analysis_config(&config)?;

    let request = build_pair_request(&config)?;
    let analysis_config = build_analysis_config(&config)?;
    let adapter = CsvAdapter::new(data_path(&config));

    run_pair_analysis(&adapter, &request, &analysis_config)
}
