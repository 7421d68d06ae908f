//! Column-wise outlier detection.
//!
//! Two methods, chosen explicitly by the caller:
//! - Z-Score: `|x - mean| / std_dev > threshold`, guarded for zero spread
//! - IQR with Tukey fences: outside `[Q1 - k*IQR, Q3 + k*IQR]`
//!
//! `OutlierEngine` applies a method to every column of a dataset, either to
//! filter rows (`filter_dataset`) or to report per column (`report_outliers`).

pub mod engine;
pub mod iqr;
pub mod types;
pub mod zscore;

pub use engine::{FilterOutcome, OutlierEngine};
pub use types::{
    Bounds, ColumnReport, Detection, DetectionMethod, Flagged, MethodKind, MissingPolicy,
    OutlierMask, OutlierPoint, OutlierReport,
};
