//! Distribution plot configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CURVE_POINTS;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DistributionConfig {
    /// Scaling applied before analysis (`min-max`, `z-score`, `log`). Default: none.
    pub scaling: Option<String>,
    /// Histogram bin rule (`sqrt` or `fd`). Default: sqrt.
    pub bins: Option<String>,
    /// Points sampled along the fitted normal curve. Default: 1000.
    pub curve_points: Option<usize>,
}

impl DistributionConfig {
    /// Returns the effective curve resolution, defaulting to 1000.
    pub fn effective_curve_points(&self) -> usize {
        self.curve_points.unwrap_or(DEFAULT_CURVE_POINTS)
    }

    /// Returns the effective bin rule name, defaulting to `sqrt`.
    pub fn effective_bins(&self) -> &str {
        self.bins.as_deref().unwrap_or("sqrt")
    }
}
