//! tabstat-analysis: the computation side of the tabstat tools.
//!
//! - `dataset`: column-oriented dataset model, delimited-file loader and writer
//! - `stats`: descriptive statistics and interpolated quantiles
//! - `outliers`: the column-wise outlier engine (z-score, IQR), filtering and reporting
//! - `scaling`: min-max, z-score and log scalers
//! - `distribution`: density histograms and fitted normal curves
//! - `report`: persisted outputs (scatter data, listings, statistics table)
//! - `pipeline`: the load → compute → save runs behind each binary

pub mod dataset;
pub mod distribution;
pub mod outliers;
pub mod pipeline;
pub mod report;
pub mod scaling;
pub mod stats;

pub use dataset::{Column, Dataset};
pub use outliers::{DetectionMethod, OutlierEngine, OutlierMask, OutlierReport};
pub use stats::Statistics;
