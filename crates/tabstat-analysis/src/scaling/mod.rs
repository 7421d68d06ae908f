//! Per-column scaling applied before statistics or plotting.
//!
//! A scaler is fitted on one column's non-missing values and can then
//! transform values and invert the transform. Missing cells stay missing.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tabstat_core::errors::{ComputeError, ConfigError};

use crate::dataset::{Column, Dataset};
use crate::stats::{mean_std, StdDevEstimator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalingMethod {
    /// Linear map of `[min, max]` onto `[0, 1]`.
    MinMax,
    /// Subtract the mean, divide by the population standard deviation.
    ZScore,
    /// Natural logarithm. Needs strictly positive values.
    Log,
}

impl ScalingMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MinMax => "min-max",
            Self::ZScore => "z-score",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for ScalingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalingMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min-max" | "minmax" => Ok(Self::MinMax),
            "z-score" | "zscore" => Ok(Self::ZScore),
            "log" => Ok(Self::Log),
            _ => Err(ConfigError::UnknownScaling(s.to_string())),
        }
    }
}

/// A scaler fitted to one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum FittedScaler {
    MinMax { min: f64, scale: f64 },
    ZScore { mean: f64, scale: f64 },
    Log,
}

impl FittedScaler {
    /// Fit `method` to the non-missing values of `column`.
    ///
    /// A zero range (min-max) or zero deviation (z-score) uses a scale of 1,
    /// so a constant column maps to all zeros instead of NaN.
    pub fn fit(method: ScalingMethod, column: &Column) -> Result<Self, ComputeError> {
        let present: Vec<f64> = column.present().collect();
        match method {
            ScalingMethod::MinMax => {
                let min = present.iter().copied().fold(f64::INFINITY, f64::min);
                let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let range = max - min;
                Ok(Self::MinMax {
                    min: if present.is_empty() { 0.0 } else { min },
                    scale: non_zero_scale(range),
                })
            }
            ScalingMethod::ZScore => {
                let (mean, std) = mean_std(&present, StdDevEstimator::Population);
                Ok(Self::ZScore {
                    mean: if present.is_empty() { 0.0 } else { mean },
                    scale: non_zero_scale(std),
                })
            }
            ScalingMethod::Log => {
                if let Some(bad) = present.iter().find(|v| **v <= 0.0) {
                    return Err(ComputeError::NonPositiveLog {
                        column: column.name().to_string(),
                        value: *bad,
                    });
                }
                Ok(Self::Log)
            }
        }
    }

    pub fn transform(&self, value: f64) -> f64 {
        match *self {
            Self::MinMax { min, scale } => (value - min) / scale,
            Self::ZScore { mean, scale } => (value - mean) / scale,
            Self::Log => value.ln(),
        }
    }

    pub fn transform_column(&self, column: &Column) -> Column {
        column.with_values(column.values().iter().map(|v| v.map(|x| self.transform(x))).collect())
    }
}

fn non_zero_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale != 0.0 {
        scale
    } else {
        1.0
    }
}

/// Fit and apply `method` to one column.
pub fn scale_column(column: &Column, method: ScalingMethod) -> Result<Column, ComputeError> {
    Ok(FittedScaler::fit(method, column)?.transform_column(column))
}

/// Scale every column with the same method.
pub fn scale_dataset(dataset: &Dataset, method: ScalingMethod) -> Result<Dataset, ComputeError> {
    dataset.try_map_columns(|c| scale_column(c, method))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_min_max() {
        let col = Column::new("x", vec![Some(2.0), None, Some(4.0), Some(6.0)]);
        let scaled = scale_column(&col, ScalingMethod::MinMax).unwrap();
        assert_eq!(scaled.values(), &[Some(0.0), None, Some(0.5), Some(1.0)]);
        assert_eq!(scaled.name(), "x");
    }

    #[test]
    fn test_z_score_mean_zero_unit_std() {
        let col = Column::from_values("x", &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let scaled = scale_column(&col, ScalingMethod::ZScore).unwrap();
        let values: Vec<f64> = scaled.present().collect();
        let (mean, std) = mean_std(&values, StdDevEstimator::Population);
        assert!(approx(mean, 0.0));
        assert!(approx(std, 1.0));
        assert!(approx(values[0], -1.5));
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let col = Column::from_values("x", &[3.0, 3.0, 3.0]);
        for method in [ScalingMethod::MinMax, ScalingMethod::ZScore] {
            let scaled = scale_column(&col, method).unwrap();
            assert!(scaled.present().all(|v| v == 0.0));
        }
    }

    #[test]
    fn test_log_rejects_non_positive() {
        let col = Column::from_values("x", &[1.0, 0.0]);
        let err = scale_column(&col, ScalingMethod::Log).unwrap_err();
        assert!(matches!(err, ComputeError::NonPositiveLog { value, .. } if value == 0.0));
    }

    #[test]
    fn test_transform_keeps_missing_in_place() {
        let col = Column::new("x", vec![Some(1.0), Some(10.0), None, Some(100.0)]);
        let fitted = FittedScaler::fit(ScalingMethod::MinMax, &col).unwrap();
        let scaled = fitted.transform_column(&col);
        assert_eq!(scaled.values()[0], Some(0.0));
        assert_eq!(scaled.values()[2], None);
        assert_eq!(scaled.values()[3], Some(1.0));
    }

    #[test]
    fn test_method_names() {
        assert_eq!("min-max".parse::<ScalingMethod>().unwrap(), ScalingMethod::MinMax);
        assert_eq!("MinMax".parse::<ScalingMethod>().unwrap(), ScalingMethod::MinMax);
        assert_eq!("z-score".parse::<ScalingMethod>().unwrap(), ScalingMethod::ZScore);
        assert_eq!("log".parse::<ScalingMethod>().unwrap(), ScalingMethod::Log);
        assert!(matches!(
            "robust".parse::<ScalingMethod>(),
            Err(ConfigError::UnknownScaling(_))
        ));
    }
}
