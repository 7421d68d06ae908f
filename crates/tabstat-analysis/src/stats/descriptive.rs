//! Min / max / mean / standard deviation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tabstat_core::errors::ConfigError;

/// Divisor used for the variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdDevEstimator {
    /// Divide by `n - 1`. Undefined (NaN) for fewer than two values.
    #[default]
    Sample,
    /// Divide by `n`.
    Population,
}

impl StdDevEstimator {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sample => "sample",
            Self::Population => "population",
        }
    }

    fn divisor(&self, n: usize) -> f64 {
        match self {
            Self::Sample => n as f64 - 1.0,
            Self::Population => n as f64,
        }
    }
}

impl fmt::Display for StdDevEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StdDevEstimator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sample" => Ok(Self::Sample),
            "population" => Ok(Self::Population),
            _ => Err(ConfigError::UnknownEstimator(s.to_string())),
        }
    }
}

/// Summary of one column.
///
/// With no values every field except `count` is NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl Statistics {
    /// Compute statistics over `values` (missing values already removed).
    pub fn compute(values: &[f64], estimator: StdDevEstimator) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (mean, std_dev) = mean_std(values, estimator);
        Self {
            count,
            min,
            max,
            mean,
            std_dev,
        }
    }

    /// Whether the spread is usable as a divisor.
    pub fn has_spread(&self) -> bool {
        self.std_dev.is_finite() && self.std_dev > 0.0
    }
}

/// Mean and standard deviation in two passes.
///
/// Returns NaN for the mean of an empty slice and NaN for the deviation
/// when the estimator's divisor is not positive.
pub fn mean_std(values: &[f64], estimator: StdDevEstimator) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let divisor = estimator.divisor(n);
    if divisor <= 0.0 {
        return (mean, f64::NAN);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / divisor;
    (mean, variance.sqrt())
}
