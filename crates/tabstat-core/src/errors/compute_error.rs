//! Computation errors.
//!
//! Zero-variance columns in z-score detection are a guarded case, not an
//! error; these variants cover inputs a transformation cannot represent.

use super::error_code::{self, TabstatErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    #[error("Column '{column}': log scaling needs positive values, found {value}")]
    NonPositiveLog { column: String, value: f64 },

    #[error("Column '{column}': cannot fit a normal distribution (mean {mean}, std dev {std_dev})")]
    DegenerateDistribution {
        column: String,
        mean: f64,
        std_dev: f64,
    },

    #[error("Column '{0}': no finite values to build a histogram from")]
    EmptyHistogram(String),
}

impl TabstatErrorCode for ComputeError {
    fn error_code(&self) -> &'static str {
        error_code::COMPUTE_ERROR
    }
}
