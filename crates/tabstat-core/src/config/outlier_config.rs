//! Outlier detection configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_IQR_MULTIPLIER, DEFAULT_MAX_FILTER_PASSES, DEFAULT_Z_THRESHOLD};

/// Configuration for the outlier tools.
///
/// Method and estimator names are kept as written; they are parsed into
/// closed enums by the analysis crate, which rejects unknown names.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutlierConfig {
    /// Detection method name (`z-score`, `zscore` or `iqr`).
    pub method: Option<String>,
    /// Z-score threshold. Default: 3.0.
    pub z_threshold: Option<f64>,
    /// Tukey fence multiplier. Default: 1.5.
    pub iqr_multiplier: Option<f64>,
    /// Standard deviation estimator (`sample` or `population`).
    pub std_estimator: Option<String>,
    /// Drop rows with missing cells when cleaning. Default: false.
    pub drop_missing: Option<bool>,
    /// Pass cap for repeated filtering. Default: 10.
    pub max_passes: Option<usize>,
}

impl OutlierConfig {
    /// Returns the effective z-score threshold, defaulting to 3.0.
    pub fn effective_z_threshold(&self) -> f64 {
        self.z_threshold.unwrap_or(DEFAULT_Z_THRESHOLD)
    }

    /// Returns the effective IQR multiplier, defaulting to 1.5.
    pub fn effective_iqr_multiplier(&self) -> f64 {
        self.iqr_multiplier.unwrap_or(DEFAULT_IQR_MULTIPLIER)
    }

    pub fn effective_drop_missing(&self) -> bool {
        self.drop_missing.unwrap_or(false)
    }

    pub fn effective_max_passes(&self) -> usize {
        self.max_passes.unwrap_or(DEFAULT_MAX_FILTER_PASSES)
    }
}
