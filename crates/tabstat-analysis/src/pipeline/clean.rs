//! Remove outlier rows and save the cleaned dataset beside the input.

use std::path::PathBuf;

use tabstat_core::errors::PipelineError;

use crate::dataset::{self, LoadOptions};
use crate::outliers::{DetectionMethod, OutlierEngine};

use super::resolve_beside;

#[derive(Debug, Clone)]
pub struct CleanRequest {
    pub input: PathBuf,
    /// Relative paths resolve against the input file's folder.
    pub output: PathBuf,
    pub load: LoadOptions,
    pub method: DetectionMethod,
    pub engine: OutlierEngine,
    /// `Some(cap)` filters repeatedly until stable, at most `cap` passes.
    /// `None` runs a single pass.
    pub until_stable: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanSummary {
    pub output: PathBuf,
    pub rows_in: usize,
    pub rows_out: usize,
    pub passes: usize,
    pub converged: bool,
}

impl CleanSummary {
    pub fn rows_removed(&self) -> usize {
        self.rows_in - self.rows_out
    }
}

pub fn run(request: &CleanRequest) -> Result<CleanSummary, PipelineError> {
    let dataset = dataset::load(&request.input, &request.load)?;

    let (cleaned, passes, converged) = match request.until_stable {
        Some(cap) => {
            let outcome = request.engine.filter_until_stable(&dataset, request.method, cap);
            (outcome.dataset, outcome.passes, outcome.converged)
        }
        None => (request.engine.filter_dataset(&dataset, request.method), 1, true),
    };

    let output = resolve_beside(&request.input, &request.output);
    dataset::save(&cleaned, &output, request.load.delimiter)?;

    let summary = CleanSummary {
        output,
        rows_in: dataset.n_rows(),
        rows_out: cleaned.n_rows(),
        passes,
        converged,
    };
    tracing::info!(
        output = %summary.output.display(),
        removed = summary.rows_removed(),
        passes,
        "clean pipeline complete"
    );
    Ok(summary)
}
