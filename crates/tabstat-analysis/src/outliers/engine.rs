//! The outlier engine: applies a detection method to every column of a
//! dataset, for filtering or for reporting.

use rayon::prelude::*;

use super::types::{
    ColumnReport, Detection, DetectionMethod, MissingPolicy, OutlierMask, OutlierPoint,
    OutlierReport,
};
use super::{iqr, zscore};
use crate::dataset::{Column, Dataset};
use crate::stats::{Statistics, StdDevEstimator};

/// Stateless engine settings. Every call is independent of the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlierEngine {
    estimator: StdDevEstimator,
    missing: MissingPolicy,
}

/// Result of repeated filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub dataset: Dataset,
    /// Filter passes applied, including the final pass that removed nothing.
    pub passes: usize,
    /// Whether a pass removed nothing before the cap was reached.
    pub converged: bool,
}

impl OutlierEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_estimator(mut self, estimator: StdDevEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_missing_policy(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    pub fn estimator(&self) -> StdDevEstimator {
        self.estimator
    }

    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing
    }

    /// Run `method` over one column's values.
    pub fn detect(&self, values: &[Option<f64>], method: DetectionMethod) -> Detection {
        match method {
            DetectionMethod::ZScore { threshold } => zscore::detect(values, threshold, self.estimator),
            DetectionMethod::Iqr { multiplier } => iqr::detect(values, multiplier),
        }
    }

    /// Outlier mask for one column, aligned with `values`. Missing cells are
    /// never flagged here; `MissingPolicy` only applies to filtering.
    pub fn compute_mask(&self, values: &[Option<f64>], method: DetectionMethod) -> OutlierMask {
        OutlierMask::from_flagged(values.len(), &self.detect(values, method).flagged)
    }

    /// Rows that are not outliers in any column.
    ///
    /// Row order and original row positions are preserved. A dataset with
    /// no columns is returned unchanged.
    pub fn filter_dataset(&self, dataset: &Dataset, method: DetectionMethod) -> Dataset {
        if dataset.n_columns() == 0 {
            return dataset.clone();
        }

        let masks: Vec<OutlierMask> = dataset
            .columns()
            .par_iter()
            .map(|column| self.compute_mask(column.values(), method))
            .collect();

        let mut flagged = vec![false; dataset.n_rows()];
        for (column, mask) in dataset.columns().iter().zip(&masks) {
            tracing::debug!(column = column.name(), outliers = mask.count(), "column mask computed");
            for (row, is_outlier) in mask.as_slice().iter().enumerate() {
                flagged[row] |= *is_outlier;
            }
            if self.missing == MissingPolicy::Drop {
                for (row, value) in column.values().iter().enumerate() {
                    flagged[row] |= value.is_none();
                }
            }
        }

        let keep: Vec<bool> = flagged.iter().map(|f| !f).collect();
        let filtered = dataset.retain_rows(&keep);
        tracing::info!(
            method = %method,
            rows_in = dataset.n_rows(),
            rows_kept = filtered.n_rows(),
            rows_removed = dataset.n_rows() - filtered.n_rows(),
            "dataset filtered"
        );
        filtered
    }

    /// Re-apply `filter_dataset` until a pass removes nothing or
    /// `max_passes` passes have run. Statistics are recomputed on the
    /// remaining rows each pass, so new outliers can surface.
    pub fn filter_until_stable(
        &self,
        dataset: &Dataset,
        method: DetectionMethod,
        max_passes: usize,
    ) -> FilterOutcome {
        let mut current = dataset.clone();
        let mut passes = 0;
        while passes < max_passes {
            let next = self.filter_dataset(&current, method);
            passes += 1;
            if next.n_rows() == current.n_rows() {
                return FilterOutcome {
                    dataset: next,
                    passes,
                    converged: true,
                };
            }
            current = next;
        }
        tracing::warn!(passes, rows = current.n_rows(), "filtering did not converge within the pass cap");
        FilterOutcome {
            dataset: current,
            passes,
            converged: false,
        }
    }

    /// Per-column masks, statistics and flagged values. Columns are
    /// independent; no cross-column combination happens here.
    pub fn report_outliers(&self, dataset: &Dataset, method: DetectionMethod) -> OutlierReport {
        let columns = dataset
            .columns()
            .par_iter()
            .map(|column| self.report_column(column, dataset.row_index(), method))
            .collect();
        OutlierReport {
            method,
            estimator: self.estimator,
            columns,
        }
    }

    fn report_column(&self, column: &Column, row_index: &[usize], method: DetectionMethod) -> ColumnReport {
        let values = column.values();
        let present: Vec<f64> = column.present().collect();
        let statistics = Statistics::compute(&present, self.estimator);
        let detection = self.detect(values, method);

        if detection.bounds.is_none() && !present.is_empty() {
            tracing::warn!(column = column.name(), "column has no spread; nothing can be flagged");
        }

        let outliers = detection
            .flagged
            .iter()
            .map(|f| OutlierPoint {
                row: row_index[f.index],
                value: f.value,
                score: f.score,
            })
            .collect();

        ColumnReport {
            column: column.name().to_string(),
            mask: OutlierMask::from_flagged(values.len(), &detection.flagged),
            statistics,
            bounds: detection.bounds,
            outliers,
            missing: column.missing_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::from_values("a", &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]),
            Column::from_values("b", &[-40.0, 11.0, 12.0, 13.0, 14.0, 15.0]),
            Column::from_values("c", &[7.0, 7.0, 7.0, 7.0, 7.0, 7.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_compute_mask_iqr() {
        let engine = OutlierEngine::new();
        let col = dataset();
        let mask = engine.compute_mask(col.column("a").unwrap().values(), DetectionMethod::iqr());
        assert_eq!(mask.as_slice(), &[false, false, false, false, false, true]);
    }

    #[test]
    fn test_filter_removes_rows_flagged_in_any_column() {
        let engine = OutlierEngine::new();
        let filtered = engine.filter_dataset(&dataset(), DetectionMethod::iqr());
        assert_eq!(filtered.row_index(), &[1, 2, 3, 4]);
        assert_eq!(
            filtered.column("a").unwrap().values(),
            &[Some(2.0), Some(3.0), Some(4.0), Some(5.0)]
        );
    }

    #[test]
    fn test_filter_constant_column_under_zscore() {
        let engine = OutlierEngine::new();
        let ds = Dataset::new(vec![Column::from_values("c", &[5.0, 5.0, 5.0, 5.0])]).unwrap();
        let method = DetectionMethod::z_score(3.0).unwrap();
        assert_eq!(engine.filter_dataset(&ds, method), ds);
    }

    #[test]
    fn test_filter_zero_columns_unchanged() {
        let engine = OutlierEngine::new();
        let ds = Dataset::new(Vec::new()).unwrap();
        assert_eq!(engine.filter_dataset(&ds, DetectionMethod::iqr()), ds);
    }

    #[test]
    fn test_missing_policy() {
        let ds = Dataset::new(vec![
            Column::new("a", vec![Some(1.0), None, Some(2.0), Some(3.0)]),
            Column::from_values("b", &[1.0, 2.0, 3.0, 4.0]),
        ])
        .unwrap();
        let keep = OutlierEngine::new().filter_dataset(&ds, DetectionMethod::iqr());
        assert_eq!(keep.n_rows(), 4);

        let drop = OutlierEngine::new()
            .with_missing_policy(MissingPolicy::Drop)
            .filter_dataset(&ds, DetectionMethod::iqr());
        assert_eq!(drop.row_index(), &[0, 2, 3]);
    }

    #[test]
    fn test_nan_cell_in_input_keeps_zscore_detection() {
        let mut text = String::from("a\n");
        for i in 1..=20 {
            text.push_str(&format!("{i}\n"));
        }
        text.push_str("1000\nNAN\n");
        let ds = crate::dataset::loader::load_from_reader(text.as_bytes(), &Default::default()).unwrap();

        let report = OutlierEngine::new().report_outliers(&ds, DetectionMethod::z_score(3.0).unwrap());
        let a = report.get("a").unwrap();
        assert_eq!(a.missing, 1);
        assert_eq!(a.outliers.iter().map(|o| o.row).collect::<Vec<_>>(), vec![20]);
        assert!(a.statistics.mean.is_finite());
    }

    #[test]
    fn test_report_is_per_column() {
        let engine = OutlierEngine::new();
        let report = engine.report_outliers(&dataset(), DetectionMethod::iqr());
        assert_eq!(report.columns.len(), 3);

        let a = report.get("a").unwrap();
        assert_eq!(a.outliers.len(), 1);
        assert_eq!(a.outliers[0].row, 5);
        assert_eq!(a.statistics.count, 6);
        assert_eq!(a.statistics.max, 100.0);

        let b = report.get("b").unwrap();
        assert_eq!(b.outliers.iter().map(|o| o.row).collect::<Vec<_>>(), vec![0]);

        assert!(report.get("c").unwrap().outliers.is_empty());
        assert_eq!(report.total_outliers(), 2);
    }

    #[test]
    fn test_report_uses_original_row_positions() {
        let engine = OutlierEngine::new();
        let ds = Dataset::with_row_index(
            vec![Column::from_values("a", &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0])],
            vec![10, 11, 12, 13, 14, 15],
        )
        .unwrap();
        let report = engine.report_outliers(&ds, DetectionMethod::iqr());
        assert_eq!(report.get("a").unwrap().outliers[0].row, 15);
        assert!(report.get("a").unwrap().mask.is_outlier(5));
    }

    #[test]
    fn test_report_on_zero_rows() {
        let engine = OutlierEngine::new();
        let ds = Dataset::new(vec![Column::new("a", vec![]), Column::new("b", vec![])]).unwrap();
        let report = engine.report_outliers(&ds, DetectionMethod::z_score(3.0).unwrap());
        assert_eq!(report.columns.len(), 2);
        for col in report.iter() {
            assert!(col.mask.is_empty());
            assert!(col.outliers.is_empty());
            assert_eq!(col.statistics.count, 0);
            assert!(col.statistics.mean.is_nan());
            assert!(col.statistics.std_dev.is_nan());
            assert!(col.statistics.min.is_nan());
            assert!(col.statistics.max.is_nan());
        }
    }

    #[test]
    fn test_filter_until_stable_recomputes() {
        // 100 hides 30 on the first pass; once 100 is gone, 30 stands out.
        let ds = Dataset::new(vec![Column::from_values(
            "a",
            &[10.0, 10.0, 11.0, 11.0, 12.0, 12.0, 13.0, 13.0, 14.0, 14.0, 30.0, 100.0],
        )])
        .unwrap();
        let engine = OutlierEngine::new();
        let method = DetectionMethod::z_score(2.0).unwrap();

        let once = engine.filter_dataset(&ds, method);
        assert_eq!(once.n_rows(), 11);
        assert_ne!(engine.filter_dataset(&once, method), once);

        let outcome = engine.filter_until_stable(&ds, method, 10);
        assert!(outcome.converged);
        assert_eq!(outcome.passes, 3);
        assert_eq!(outcome.dataset.row_index(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(engine.filter_dataset(&outcome.dataset, method), outcome.dataset);
    }

    #[test]
    fn test_filter_until_stable_respects_cap() {
        let ds = dataset();
        let outcome = OutlierEngine::new().filter_until_stable(&ds, DetectionMethod::iqr(), 1);
        assert_eq!(outcome.passes, 1);
        assert!(!outcome.converged);
    }
}
