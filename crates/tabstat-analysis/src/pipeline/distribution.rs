//! Distribution data per column plus the statistics table.

use std::path::PathBuf;

use rayon::prelude::*;
use tabstat_core::constants::STATISTICS_FILE_NAME;
use tabstat_core::errors::PipelineError;

use crate::dataset::{self, Column, LoadOptions};
use crate::distribution::{BinRule, DistributionPlot, Histogram, NormalCurve};
use crate::report::{self, StatisticsRow};
use crate::scaling::{self, ScalingMethod};
use crate::stats::{Statistics, StdDevEstimator};

#[derive(Debug, Clone)]
pub struct DistributionRequest {
    pub input: PathBuf,
    pub output_folder: PathBuf,
    pub load: LoadOptions,
    pub scaling: Option<ScalingMethod>,
    pub bins: BinRule,
    pub curve_points: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    pub output_folder: PathBuf,
    pub columns: usize,
    /// Columns that produced plot data.
    pub plots: usize,
    pub statistics_file: PathBuf,
}

pub fn run(request: &DistributionRequest) -> Result<DistributionSummary, PipelineError> {
    let mut dataset = dataset::load(&request.input, &request.load)?;
    let folder = &request.output_folder;
    report::ensure_dir(folder)?;

    if let Some(method) = request.scaling {
        dataset = scaling::scale_dataset(&dataset, method)?;
        tracing::info!(%method, "columns scaled");
    }
    dataset.fill_missing_with_mean();

    let analysed: Vec<(StatisticsRow, Option<DistributionPlot>)> = dataset
        .columns()
        .par_iter()
        .map(|column| analyse_column(column, request.bins, request.curve_points))
        .collect();

    let mut plots = 0;
    for (_, plot) in &analysed {
        if let Some(plot) = plot {
            let path = folder.join(format!("{}.json", report::sanitize_file_name(&plot.column)));
            report::write_json(&path, plot)?;
            plots += 1;
        }
    }

    let rows: Vec<StatisticsRow> = analysed.into_iter().map(|(row, _)| row).collect();
    let statistics_file = folder.join(STATISTICS_FILE_NAME);
    report::write_statistics_csv(&statistics_file, &rows)?;

    let summary = DistributionSummary {
        output_folder: folder.clone(),
        columns: dataset.n_columns(),
        plots,
        statistics_file,
    };
    tracing::info!(
        folder = %folder.display(),
        columns = summary.columns,
        plots,
        "distribution pipeline complete"
    );
    Ok(summary)
}

/// Statistics use the sample deviation. A column with no values gets no
/// plot; a column with no spread gets a histogram without a curve.
fn analyse_column(column: &Column, bins: BinRule, curve_points: usize) -> (StatisticsRow, Option<DistributionPlot>) {
    let values: Vec<f64> = column.present().collect();
    let statistics = Statistics::compute(&values, StdDevEstimator::Sample);
    let row = StatisticsRow {
        column: column.name().to_string(),
        statistics,
    };

    let histogram = match Histogram::build(column.name(), &values, bins) {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!(column = column.name(), error = %e, "skipping distribution plot");
            return (row, None);
        }
    };
    let curve = match NormalCurve::fit(column.name(), &statistics, curve_points) {
        Ok(curve) => Some(curve),
        Err(e) => {
            tracing::warn!(column = column.name(), error = %e, "no normal curve");
            None
        }
    };

    let plot = DistributionPlot {
        column: column.name().to_string(),
        statistics,
        histogram,
        curve,
    };
    (row, Some(plot))
}
