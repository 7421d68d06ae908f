//! Input/output configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DELIMITER;
use crate::errors::ConfigError;

/// Configuration for reading and writing delimited files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IoConfig {
    /// Field delimiter. Default: tab. Accepts `\t` and `tab` spelled out.
    pub delimiter: Option<String>,
    /// Treat the first line as data and name columns `Feature 1..n`. Default: false.
    pub no_header: Option<bool>,
}

impl IoConfig {
    /// Returns the effective delimiter byte, defaulting to tab.
    pub fn effective_delimiter(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_deref() {
            Some(raw) => parse_delimiter(raw),
            None => Ok(DEFAULT_DELIMITER),
        }
    }

    /// Returns whether the input has a header row, defaulting to true.
    pub fn effective_has_header(&self) -> bool {
        !self.no_header.unwrap_or(false)
    }
}

/// Parse a user-supplied delimiter into a single byte.
///
/// Shells make a literal tab awkward to type, so `\t`, `\\t` and `tab`
/// all mean TAB.
pub fn parse_delimiter(raw: &str) -> Result<u8, ConfigError> {
    match raw {
        "\\t" | "\\\\t" | "tab" | "TAB" => Ok(b'\t'),
        _ if raw.len() == 1 => Ok(raw.as_bytes()[0]),
        _ => Err(ConfigError::InvalidDelimiter(raw.to_string())),
    }
}
