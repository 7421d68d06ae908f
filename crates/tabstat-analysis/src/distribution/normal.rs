//! Fitted normal density curve via `statrs`.

use serde::Serialize;
use statrs::distribution::{Continuous, Normal};
use tabstat_core::errors::ComputeError;

use crate::stats::Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub density: f64,
}

/// Normal pdf with the column's mean and standard deviation, sampled at
/// evenly spaced points from the column minimum to its maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalCurve {
    pub mean: f64,
    pub std_dev: f64,
    pub points: Vec<CurvePoint>,
}

impl NormalCurve {
    pub fn fit(column: &str, stats: &Statistics, points: usize) -> Result<Self, ComputeError> {
        let degenerate = || ComputeError::DegenerateDistribution {
            column: column.to_string(),
            mean: stats.mean,
            std_dev: stats.std_dev,
        };
        if !stats.has_spread() || !stats.mean.is_finite() {
            return Err(degenerate());
        }
        let normal = Normal::new(stats.mean, stats.std_dev).map_err(|_| degenerate())?;

        let points = points.max(2);
        let step = (stats.max - stats.min) / (points - 1) as f64;
        let points = (0..points)
            .map(|i| {
                let x = stats.min + i as f64 * step;
                CurvePoint {
                    x,
                    density: normal.pdf(x),
                }
            })
            .collect();

        Ok(Self {
            mean: stats.mean,
            std_dev: stats.std_dev,
            points,
        })
    }
}
