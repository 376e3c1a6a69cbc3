//! Domain error types.
//!
//! Engine conditions such as empty input or an insufficient window are
//! reported as values by the engines themselves; `QuantError` only covers the
//! configuration and data-loading edges.

/// Top-level error type for ratioquant.
#[derive(Debug, thiserror::Error)]
pub enum QuantError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuantError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        QuantError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(section: &str, key: &str) -> Self {
        QuantError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    /// True for errors caused by the configuration rather than the data.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            QuantError::ConfigParse { .. }
                | QuantError::ConfigMissing { .. }
                | QuantError::ConfigInvalid { .. }
        )
    }
}
