//! Distribution plot data: density histogram plus fitted normal curve.

pub mod histogram;
pub mod normal;

use serde::Serialize;

pub use histogram::{BinRule, Histogram, HistogramBin};
pub use normal::{CurvePoint, NormalCurve};

use crate::stats::Statistics;

/// Everything needed to draw one column's distribution.
///
/// `curve` is absent when the column has no spread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionPlot {
    pub column: String,
    pub statistics: Statistics,
    pub histogram: Histogram,
    pub curve: Option<NormalCurve>,
}
