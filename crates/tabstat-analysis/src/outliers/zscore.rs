//! Z-Score detection.
//!
//! Mean and standard deviation come from the finite values; a value
//! is flagged when `|x - mean| / std_dev > threshold`. A column with zero
//! or undefined spread has no outliers.

use super::types::{Bounds, Detection, Flagged};
use crate::stats::{mean_std, StdDevEstimator};

/// Detect outliers by z-score.
///
/// `values`: one column, `None` for missing cells (never flagged).
/// `threshold`: strict bound on `|z|`.
///
/// Flagged indices point into `values`.
pub fn detect(values: &[Option<f64>], threshold: f64, estimator: StdDevEstimator) -> Detection {
    let present: Vec<f64> = values.iter().filter_map(|v| *v).filter(|v| v.is_finite()).collect();
    let (mean, stddev) = mean_std(&present, estimator);

    if !stddev.is_finite() || stddev <= 0.0 || !mean.is_finite() {
        // Zero spread: every z-score would be 0/0.
        return Detection::default();
    }

    let flagged = values
        .iter()
        .enumerate()
        .filter_map(|(index, v)| {
            let value = (*v)?;
            let z = (value - mean) / stddev;
            (z.abs() > threshold).then_some(Flagged {
                index,
                value,
                score: z,
            })
        })
        .collect();

    Detection {
        flagged,
        bounds: Some(Bounds {
            lower: mean - threshold * stddev,
            upper: mean + threshold * stddev,
        }),
    }
}
