//! Descriptive statistics over the non-missing values of a column.

pub mod descriptive;
pub mod quantile;

pub use descriptive::{mean_std, Statistics, StdDevEstimator};
pub use quantile::{percentile, sorted_finite, Quartiles};
