//! `clean-outliers`: drop outlier rows and save the rest beside the input.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tabstat_analysis::outliers::{MethodKind, MissingPolicy, OutlierEngine};
use tabstat_analysis::pipeline::{clean, CleanRequest};
use tabstat_analysis::stats::StdDevEstimator;
use tabstat_core::config::CliOverrides;
use tabstat_core::errors::PipelineError;

use crate::common::{self, InputArgs};

/// Sample deviation (n - 1), as pandas computes it.
pub const CLEAN_ESTIMATOR: StdDevEstimator = StdDevEstimator::Sample;

#[derive(Debug, Parser)]
#[command(name = "clean-outliers")]
#[command(about = "Remove outliers from a delimited dataset and save the cleaned dataset next to the input file")]
pub struct CleanArgs {
    /// Input dataset file
    pub input_file: PathBuf,

    /// Outlier detection method: z-score or iqr
    pub method: String,

    /// Output file name, resolved against the input file's folder
    pub output_file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    /// Z-score threshold [default: 3]
    #[arg(long)]
    pub z_threshold: Option<f64>,

    /// IQR fence multiplier [default: 1.5]
    #[arg(long)]
    pub iqr_multiplier: Option<f64>,

    /// Also drop rows with missing cells
    #[arg(long)]
    pub drop_missing: bool,

    /// Filter repeatedly until no more rows are removed
    #[arg(long)]
    pub until_stable: bool,
}

impl CleanArgs {
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            method: Some(self.method.clone()),
            z_threshold: self.z_threshold,
            iqr_multiplier: self.iqr_multiplier,
            drop_missing: self.drop_missing.then_some(true),
            ..CliOverrides::default()
        };
        self.input.apply(&mut overrides);
        overrides
    }
}

pub fn run(args: CleanArgs) -> anyhow::Result<String> {
    execute(&args).with_context(|| format!("cleaning {}", args.input_file.display()))
}

fn execute(args: &CleanArgs) -> Result<String, PipelineError> {
    let config = common::load_config(&args.overrides())?;
    let outliers = &config.outliers;

    let method_name = outliers.method.as_deref().unwrap_or(&args.method);
    let method = method_name
        .parse::<MethodKind>()?
        .with_params(outliers.effective_z_threshold(), outliers.effective_iqr_multiplier())?;

    let missing = if outliers.effective_drop_missing() {
        MissingPolicy::Drop
    } else {
        MissingPolicy::Keep
    };
    let engine = OutlierEngine::new()
        .with_estimator(common::std_estimator(&config, CLEAN_ESTIMATOR)?)
        .with_missing_policy(missing);

    let request = CleanRequest {
        input: args.input_file.clone(),
        output: args.output_file.clone(),
        load: common::load_options(&config)?,
        method,
        engine,
        until_stable: args.until_stable.then(|| outliers.effective_max_passes()),
    };
    tracing::debug!(?request, "running clean pipeline");

    let summary = clean::run(&request)?;
    Ok(format!(
        "Cleaned dataset saved to {} ({} of {} rows removed)",
        summary.output.display(),
        summary.rows_removed(),
        summary.rows_in
    ))
}
