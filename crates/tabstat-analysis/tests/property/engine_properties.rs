use proptest::prelude::*;
use tabstat_analysis::dataset::{Column, Dataset};
use tabstat_analysis::outliers::{DetectionMethod, MissingPolicy, OutlierEngine};

fn cell() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        8 => (-1.0e6..1.0e6f64).prop_map(Some),
        1 => Just(None),
    ]
}

fn dataset() -> impl Strategy<Value = Dataset> {
    (1usize..5, 0usize..40).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(prop::collection::vec(cell(), rows), cols).prop_map(|columns| {
            let columns = columns
                .into_iter()
                .enumerate()
                .map(|(i, values)| Column::new(format!("c{i}"), values))
                .collect();
            Dataset::new(columns).unwrap()
        })
    })
}

fn method() -> impl Strategy<Value = DetectionMethod> {
    prop_oneof![
        (0.5..4.0f64).prop_map(|t| DetectionMethod::z_score(t).unwrap()),
        (0.5..3.0f64).prop_map(|k| DetectionMethod::iqr_with_multiplier(k).unwrap()),
    ]
}

proptest! {
    #[test]
    fn filter_returns_subset_with_unaltered_values(ds in dataset(), m in method()) {
        let filtered = OutlierEngine::new().filter_dataset(&ds, m);
        prop_assert!(filtered.n_rows() <= ds.n_rows());
        prop_assert_eq!(filtered.n_columns(), ds.n_columns());

        // Surviving positions are an ordered subsequence of the input positions.
        let mut source = ds.row_index().iter().enumerate();
        for (pos, original) in filtered.row_index().iter().enumerate() {
            let (src_pos, _) = source.find(|(_, r)| *r == original).expect("row not in source");
            for (out_col, in_col) in filtered.columns().iter().zip(ds.columns()) {
                prop_assert_eq!(out_col.values()[pos], in_col.values()[src_pos]);
            }
        }
    }

    #[test]
    fn masks_are_deterministic(ds in dataset(), m in method()) {
        let engine = OutlierEngine::new();
        for column in ds.columns() {
            let a = engine.compute_mask(column.values(), m);
            let b = engine.compute_mask(column.values(), m);
            prop_assert_eq!(a.len(), column.len());
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn missing_cells_are_never_flagged(ds in dataset(), m in method()) {
        let engine = OutlierEngine::new();
        for column in ds.columns() {
            let mask = engine.compute_mask(column.values(), m);
            for (v, flagged) in column.values().iter().zip(mask.as_slice()) {
                prop_assert!(!(v.is_none() && *flagged));
            }
        }
    }

    #[test]
    fn drop_policy_leaves_no_missing_cells(ds in dataset(), m in method()) {
        let filtered = OutlierEngine::new()
            .with_missing_policy(MissingPolicy::Drop)
            .filter_dataset(&ds, m);
        for column in filtered.columns() {
            prop_assert_eq!(column.missing_count(), 0);
        }
    }

    #[test]
    fn report_matches_masks(ds in dataset(), m in method()) {
        let engine = OutlierEngine::new();
        let report = engine.report_outliers(&ds, m);
        prop_assert_eq!(report.columns.len(), ds.n_columns());
        for (column, col_report) in ds.columns().iter().zip(report.iter()) {
            prop_assert_eq!(col_report.column.as_str(), column.name());
            prop_assert_eq!(&col_report.mask, &engine.compute_mask(column.values(), m));
            prop_assert_eq!(col_report.outliers.len(), col_report.mask.count());
        }
    }

    #[test]
    fn stable_filter_is_a_fixed_point(ds in dataset(), m in method()) {
        let engine = OutlierEngine::new();
        let outcome = engine.filter_until_stable(&ds, m, 50);
        if outcome.converged {
            prop_assert_eq!(engine.filter_dataset(&outcome.dataset, m), outcome.dataset);
        }
    }
}
