//! Core types for outlier detection.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tabstat_core::constants::{DEFAULT_IQR_MULTIPLIER, DEFAULT_Z_THRESHOLD};
use tabstat_core::errors::ConfigError;

use crate::stats::{Statistics, StdDevEstimator};

/// Method name as typed by a user, before its parameters are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    ZScore,
    Iqr,
}

impl MethodKind {
    /// Attach parameters, validating them.
    pub fn with_params(self, z_threshold: f64, iqr_multiplier: f64) -> Result<DetectionMethod, ConfigError> {
        match self {
            Self::ZScore => DetectionMethod::z_score(z_threshold),
            Self::Iqr => DetectionMethod::iqr_with_multiplier(iqr_multiplier),
        }
    }
}

impl FromStr for MethodKind {
    type Err = ConfigError;

    /// Accepts `z-score`, `zscore` and `iqr`, ignoring case. Anything else
    /// is rejected rather than falling back to a default method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "z-score" | "zscore" => Ok(Self::ZScore),
            "iqr" => Ok(Self::Iqr),
            _ => Err(ConfigError::UnknownMethod(s.to_string())),
        }
    }
}

/// Statistical method used for outlier detection, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DetectionMethod {
    ZScore { threshold: f64 },
    Iqr { multiplier: f64 },
}

impl DetectionMethod {
    pub fn z_score(threshold: f64) -> Result<Self, ConfigError> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(ConfigError::ValidationFailed {
                field: "z_threshold".to_string(),
                message: format!("must be a positive finite number, got {threshold}"),
            });
        }
        Ok(Self::ZScore { threshold })
    }

    /// IQR with the usual 1.5 fence multiplier.
    pub fn iqr() -> Self {
        Self::Iqr {
            multiplier: DEFAULT_IQR_MULTIPLIER,
        }
    }

    pub fn iqr_with_multiplier(multiplier: f64) -> Result<Self, ConfigError> {
        if !(multiplier.is_finite() && multiplier >= 0.0) {
            return Err(ConfigError::ValidationFailed {
                field: "iqr_multiplier".to_string(),
                message: format!("must be a non-negative finite number, got {multiplier}"),
            });
        }
        Ok(Self::Iqr { multiplier })
    }

    /// Parse a method name and attach parameters.
    pub fn from_name(name: &str, z_threshold: f64, iqr_multiplier: f64) -> Result<Self, ConfigError> {
        name.parse::<MethodKind>()?.with_params(z_threshold, iqr_multiplier)
    }

    pub fn kind(&self) -> MethodKind {
        match self {
            Self::ZScore { .. } => MethodKind::ZScore,
            Self::Iqr { .. } => MethodKind::Iqr,
        }
    }

    /// Short name, used in output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ZScore { .. } => "zscore",
            Self::Iqr { .. } => "iqr",
        }
    }
}

impl Default for DetectionMethod {
    fn default() -> Self {
        Self::ZScore {
            threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZScore { threshold } => write!(f, "z-score (threshold {threshold})"),
            Self::Iqr { multiplier } => write!(f, "iqr (fence multiplier {multiplier})"),
        }
    }
}

/// What filtering does with a missing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Missing cells never flag their row.
    #[default]
    Keep,
    /// A row with any missing cell is removed.
    Drop,
}

/// One flagged value, indexed into the analysed slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flagged {
    pub index: usize,
    pub value: f64,
    /// z-score for Z-Score; distance beyond the fence in IQR units for IQR.
    pub score: f64,
}

/// Range of values considered normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

/// Output of a single-column detector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub flagged: Vec<Flagged>,
    /// `None` when the column gave the method nothing to work with
    /// (no values, or zero spread for Z-Score).
    pub bounds: Option<Bounds>,
}

/// Per-row outlier flags for one column; `true` marks an outlier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct OutlierMask(Vec<bool>);

impl OutlierMask {
    /// All-`false` mask of `len` rows.
    pub fn clear(len: usize) -> Self {
        Self(vec![false; len])
    }

    pub fn from_flagged(len: usize, flagged: &[Flagged]) -> Self {
        let mut mask = vec![false; len];
        for f in flagged {
            mask[f.index] = true;
        }
        Self(mask)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_outlier(&self, row: usize) -> bool {
        self.0.get(row).copied().unwrap_or(false)
    }

    /// Number of flagged rows.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl From<Vec<bool>> for OutlierMask {
    fn from(v: Vec<bool>) -> Self {
        Self(v)
    }
}

/// A flagged value located in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierPoint {
    /// Original row position (see `Dataset::row_index`).
    pub row: usize,
    pub value: f64,
    pub score: f64,
}

/// Detection result for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnReport {
    pub column: String,
    pub mask: OutlierMask,
    pub statistics: Statistics,
    pub bounds: Option<Bounds>,
    pub outliers: Vec<OutlierPoint>,
    pub missing: usize,
}

/// Detection results for every column, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub method: DetectionMethod,
    pub estimator: StdDevEstimator,
    pub columns: Vec<ColumnReport>,
}

impl OutlierReport {
    pub fn get(&self, column: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnReport> {
        self.columns.iter()
    }

    pub fn total_outliers(&self) -> usize {
        self.columns.iter().map(|c| c.outliers.len()).sum()
    }
}
