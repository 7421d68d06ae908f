//! Per-column outlier detection with scatter data and text listings.

use std::path::PathBuf;

use tabstat_core::constants::OUTLIER_REPORT_FILE_NAME;
use tabstat_core::errors::PipelineError;

use crate::dataset::{self, LoadOptions};
use crate::outliers::{DetectionMethod, OutlierEngine};
use crate::report::{self, ScatterPlot};

#[derive(Debug, Clone)]
pub struct DetectRequest {
    pub input: PathBuf,
    pub output_folder: PathBuf,
    pub load: LoadOptions,
    pub method: DetectionMethod,
    pub engine: OutlierEngine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectSummary {
    pub output_folder: PathBuf,
    pub columns: usize,
    pub total_outliers: usize,
    pub files: Vec<PathBuf>,
}

pub fn run(request: &DetectRequest) -> Result<DetectSummary, PipelineError> {
    let dataset = dataset::load(&request.input, &request.load)?;
    let folder = &request.output_folder;
    report::ensure_dir(folder)?;

    let outliers = request.engine.report_outliers(&dataset, request.method);
    let method_name = request.method.name();
    let mut files = Vec::with_capacity(dataset.n_columns() * 2 + 1);

    for (column, column_report) in dataset.columns().iter().zip(outliers.iter()) {
        let plot = ScatterPlot::from_report(column, dataset.row_index(), column_report, request.method);
        let json_path = report::outlier_file_path(folder, column.name(), method_name, "json");
        report::write_json(&json_path, &plot)?;

        let listing_path = report::outlier_file_path(folder, column.name(), method_name, "txt");
        report::write_listing(&listing_path, column_report)?;

        tracing::debug!(
            column = column.name(),
            outliers = column_report.outliers.len(),
            "column report written"
        );
        files.push(json_path);
        files.push(listing_path);
    }

    let report_path = folder.join(OUTLIER_REPORT_FILE_NAME);
    report::write_json(&report_path, &outliers)?;
    files.push(report_path);

    let summary = DetectSummary {
        output_folder: folder.clone(),
        columns: dataset.n_columns(),
        total_outliers: outliers.total_outliers(),
        files,
    };
    tracing::info!(
        folder = %folder.display(),
        columns = summary.columns,
        outliers = summary.total_outliers,
        "detect pipeline complete"
    );
    Ok(summary)
}
