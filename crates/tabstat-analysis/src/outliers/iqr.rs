//! IQR with Tukey fences.
//!
//! Resistant to extreme outliers that inflate the standard deviation.
//! Uses Q1 - k*IQR and Q3 + k*IQR as fences (k = 1.5 by default), with
//! quartiles interpolated linearly over the sorted non-missing values.

use super::types::{Bounds, Detection, Flagged};
use crate::stats::{sorted_finite, Quartiles};

/// Detect outliers using IQR with Tukey fences.
///
/// `values`: one column, `None` for missing cells (never flagged).
/// `multiplier`: IQR multiplier for the fences.
pub fn detect(values: &[Option<f64>], multiplier: f64) -> Detection {
    let present: Vec<f64> = values.iter().filter_map(|v| *v).collect();
    let sorted = sorted_finite(&present);
    if sorted.is_empty() {
        return Detection::default();
    }

    let quartiles = Quartiles::from_sorted(&sorted);
    let iqr = quartiles.iqr();
    let (lower_fence, upper_fence) = quartiles.fences(multiplier);

    let flagged = values
        .iter()
        .enumerate()
        .filter_map(|(index, v)| {
            let value = (*v)?;
            if !(value < lower_fence || value > upper_fence) {
                return None;
            }
            let distance = if value < lower_fence {
                lower_fence - value
            } else {
                value - upper_fence
            };
            // With IQR = 0 the distance itself is the only meaningful score.
            let score = if iqr > 0.0 { distance / iqr } else { distance };
            Some(Flagged {
                index,
                value,
                score,
            })
        })
        .collect();

    Detection {
        flagged,
        bounds: Some(Bounds {
            lower: lower_fence,
            upper: upper_fence,
        }),
    }
}
