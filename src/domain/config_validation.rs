//! Configuration validation.
//!
//! Validates all config fields before an analysis runs. Values that are
//! present but unparseable are rejected rather than silently defaulted.

use crate::domain::analysis::Leg;
use crate::domain::backtest::Direction;
use crate::domain::error::QuantError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::str::FromStr;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), QuantError> {
    validate_pair_symbols(config)?;
    validate_target(config)?;
    validate_dates(config)?;
    validate_backtest_config(config)?;
    validate_indicator_config(config)?;
    Ok(())
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), QuantError> {
    validate_threshold(config)?;
    validate_direction(config)?;
    validate_holding_period(config)?;
    Ok(())
}

pub fn validate_indicator_config(config: &dyn ConfigPort) -> Result<(), QuantError> {
    for key in ["ma_short", "ma_long", "rsi_period", "range_period"] {
        validate_positive_int(config, "indicators", key)?;
    }
    validate_moving_averages(config)?;
    validate_bollinger(config)?;
    Ok(())
}

/// Parses `[section] key` when present. Absent or blank keys are `None`.
pub fn parse_optional<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, QuantError> {
    match config.get_non_empty(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| QuantError::invalid(section, key, format!("cannot parse '{}'", raw))),
    }
}

pub fn parse_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<NaiveDate>, QuantError> {
    match config.get_non_empty(section, key) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                QuantError::invalid(
                    section,
                    key,
                    format!("invalid {} format, expected YYYY-MM-DD", key),
                )
            }),
    }
}

fn validate_pair_symbols(config: &dyn ConfigPort) -> Result<(), QuantError> {
    let numerator = config
        .get_non_empty("pair", "numerator")
        .ok_or_else(|| QuantError::missing("pair", "numerator"))?;
    let denominator = config
        .get_non_empty("pair", "denominator")
        .ok_or_else(|| QuantError::missing("pair", "denominator"))?;

    if numerator.eq_ignore_ascii_case(&denominator) {
        return Err(QuantError::invalid(
            "pair",
            "denominator",
            "denominator must differ from numerator",
        ));
    }
    Ok(())
}

fn validate_target(config: &dyn ConfigPort) -> Result<(), QuantError> {
    if let Some(raw) = config.get_non_empty("pair", "target") {
        raw.parse::<Leg>()
            .map_err(|reason| QuantError::invalid("pair", "target", reason))?;
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), QuantError> {
    let start_date = parse_date(config, "pair", "start_date")?;
    let end_date = parse_date(config, "pair", "end_date")?;

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start >= end {
            return Err(QuantError::invalid(
                "pair",
                "start_date",
                "start_date must be before end_date",
            ));
        }
    }
    Ok(())
}

fn validate_threshold(config: &dyn ConfigPort) -> Result<(), QuantError> {
    if let Some(value) = parse_optional::<f64>(config, "backtest", "threshold")? {
        if !value.is_finite() || value <= 0.0 {
            return Err(QuantError::invalid(
                "backtest",
                "threshold",
                "threshold must be a positive number",
            ));
        }
    }
    Ok(())
}

fn validate_direction(config: &dyn ConfigPort) -> Result<(), QuantError> {
    if let Some(raw) = config.get_non_empty("backtest", "direction") {
        raw.parse::<Direction>()
            .map_err(|reason| QuantError::invalid("backtest", "direction", reason))?;
    }
    Ok(())
}

fn validate_holding_period(config: &dyn ConfigPort) -> Result<(), QuantError> {
    validate_positive_int(config, "backtest", "holding_period")
}

fn validate_positive_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), QuantError> {
    if let Some(value) = parse_optional::<i64>(config, section, key)? {
        if value <= 0 {
            return Err(QuantError::invalid(
                section,
                key,
                format!("{} must be a positive integer", key),
            ));
        }
    }
    Ok(())
}

fn validate_moving_averages(config: &dyn ConfigPort) -> Result<(), QuantError> {
    let short = config.get_int("indicators", "ma_short", 20);
    let long = config.get_int("indicators", "ma_long", 60);
    if short >= long {
        return Err(QuantError::invalid(
            "indicators",
            "ma_short",
            "ma_short must be shorter than ma_long",
        ));
    }
    Ok(())
}

fn validate_bollinger(config: &dyn ConfigPort) -> Result<(), QuantError> {
    if let Some(period) = parse_optional::<i64>(config, "indicators", "bollinger_period")? {
        if period < 2 {
            return Err(QuantError::invalid(
                "indicators",
                "bollinger_period",
                "bollinger_period must be at least 2",
            ));
        }
    }
    if let Some(mult) = parse_optional::<f64>(config, "indicators", "bollinger_mult")? {
        if !mult.is_finite() || mult < 0.0 {
            return Err(QuantError::invalid(
                "indicators",
                "bollinger_mult",
                "bollinger_mult must be non-negative",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    const VALID: &str = r#"
[pair]
numerator = GOLD
denominator = SILVER
target = denominator
start_date = 2020-01-01
end_date = 2024-12-31

[backtest]
threshold = 80
direction = above
holding_period = 30

[indicators]
ma_short = 20
ma_long = 60
rsi_period = 14
bollinger_period = 20
bollinger_mult = 2.0
range_period = 30
"#;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    fn with_replaced(from: &str, to: &str) -> FileConfigAdapter {
        adapter(&VALID.replace(from, to))
    }

    fn assert_invalid_key(result: Result<(), QuantError>, expected: &str) {
        match result {
            Err(QuantError::ConfigInvalid { key, .. }) => assert_eq!(key, expected),
            other => panic!("expected ConfigInvalid for {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate_analysis_config(&adapter(VALID)).is_ok());
    }

    #[test]
    fn minimal_config_passes() {
        let cfg = adapter("[pair]\nnumerator = GOLD\ndenominator = SILVER\n");
        assert!(validate_analysis_config(&cfg).is_ok());
    }

    #[test]
    fn missing_numerator() {
        let cfg = adapter("[pair]\ndenominator = SILVER\n");
        let err = validate_analysis_config(&cfg).unwrap_err();
        assert!(matches!(err, QuantError::ConfigMissing { key, .. } if key == "numerator"));
    }

    #[test]
    fn blank_denominator_is_missing() {
        let cfg = adapter("[pair]\nnumerator = GOLD\ndenominator =   \n");
        let err = validate_analysis_config(&cfg).unwrap_err();
        assert!(matches!(err, QuantError::ConfigMissing { key, .. } if key == "denominator"));
    }

    #[test]
    fn same_symbol_on_both_legs() {
        let cfg = with_replaced("denominator = SILVER", "denominator = gold");
        assert_invalid_key(validate_analysis_config(&cfg), "denominator");
    }

    #[test]
    fn unknown_target() {
        let cfg = with_replaced("target = denominator", "target = silver");
        assert_invalid_key(validate_analysis_config(&cfg), "target");
    }

    #[test]
    fn bad_date_format() {
        let cfg = with_replaced("start_date = 2020-01-01", "start_date = 2020/01/01");
        assert_invalid_key(validate_analysis_config(&cfg), "start_date");
    }

    #[test]
    fn start_after_end() {
        let cfg = with_replaced("start_date = 2020-01-01", "start_date = 2025-01-01");
        assert_invalid_key(validate_analysis_config(&cfg), "start_date");
    }

    #[test]
    fn negative_threshold() {
        let cfg = with_replaced("threshold = 80", "threshold = -1");
        assert_invalid_key(validate_analysis_config(&cfg), "threshold");
    }

    #[test]
    fn non_numeric_threshold() {
        let cfg = with_replaced("threshold = 80", "threshold = high");
        assert_invalid_key(validate_analysis_config(&cfg), "threshold");
    }

    #[test]
    fn unknown_direction() {
        let cfg = with_replaced("direction = above", "direction = sideways");
        assert_invalid_key(validate_analysis_config(&cfg), "direction");
    }

    #[test]
    fn zero_holding_period() {
        let cfg = with_replaced("holding_period = 30", "holding_period = 0");
        assert_invalid_key(validate_analysis_config(&cfg), "holding_period");
    }

    #[test]
    fn non_numeric_holding_period() {
        let cfg = with_replaced("holding_period = 30", "holding_period = month");
        assert_invalid_key(validate_analysis_config(&cfg), "holding_period");
    }

    #[test]
    fn zero_rsi_period() {
        let cfg = with_replaced("rsi_period = 14", "rsi_period = 0");
        assert_invalid_key(validate_analysis_config(&cfg), "rsi_period");
    }

    #[test]
    fn short_not_below_long() {
        let cfg = with_replaced("ma_short = 20", "ma_short = 60");
        assert_invalid_key(validate_analysis_config(&cfg), "ma_short");
    }

    #[test]
    fn bollinger_period_too_small() {
        let cfg = with_replaced("bollinger_period = 20", "bollinger_period = 1");
        assert_invalid_key(validate_analysis_config(&cfg), "bollinger_period");
    }

    #[test]
    fn negative_bollinger_mult() {
        let cfg = with_replaced("bollinger_mult = 2.0", "bollinger_mult = -2");
        assert_invalid_key(validate_analysis_config(&cfg), "bollinger_mult");
    }

    #[test]
    fn parse_optional_absent_is_none() {
        let cfg = adapter("[backtest]\n");
        assert_eq!(parse_optional::<f64>(&cfg, "backtest", "threshold").unwrap(), None);
    }
}
