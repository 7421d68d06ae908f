//! Configuration errors.

use super::error_code::{self, TabstatErrorCode};

/// Errors raised while resolving configuration or parsing tool arguments.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Unknown detection method '{0}' (expected z-score, zscore or iqr)")]
    UnknownMethod(String),

    #[error("Unknown scaling method '{0}' (expected min-max, z-score or log)")]
    UnknownScaling(String),

    #[error("Unknown bin rule '{0}' (expected sqrt or fd)")]
    UnknownBinRule(String),

    #[error("Unknown standard deviation estimator '{0}' (expected sample or population)")]
    UnknownEstimator(String),

    #[error("Invalid delimiter '{0}': must be a single byte or \\t")]
    InvalidDelimiter(String),
}

impl TabstatErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
