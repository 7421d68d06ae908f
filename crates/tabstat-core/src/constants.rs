//! Shared constants for the tabstat tools.

/// tabstat version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default field delimiter (tab).
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Default z-score threshold for outlier detection.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// Default Tukey fence multiplier for IQR detection.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Default number of points sampled along a fitted normal curve.
pub const DEFAULT_CURVE_POINTS: usize = 1000;

/// Default pass cap for repeated filtering.
pub const DEFAULT_MAX_FILTER_PASSES: usize = 10;

/// File name of the per-feature statistics table written by `draw-dist`.
pub const STATISTICS_FILE_NAME: &str = "feature_statistics.csv";

/// File name of the combined report written by `detect-outliers`.
pub const OUTLIER_REPORT_FILE_NAME: &str = "outlier_report.json";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE_NAME: &str = "tabstat.toml";

/// Cell values treated as missing when loading a dataset (besides empty cells).
pub const MISSING_MARKERS: &[&str] = &["NaN", "nan", "NA", "N/A", "null"];
