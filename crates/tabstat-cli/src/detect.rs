//! `detect-outliers`: per-column scatter data and outlier listings.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tabstat_analysis::outliers::{MethodKind, OutlierEngine};
use tabstat_analysis::pipeline::{detect, DetectRequest};
use tabstat_analysis::stats::StdDevEstimator;
use tabstat_core::config::CliOverrides;
use tabstat_core::errors::PipelineError;

use crate::common::{self, InputArgs};

/// Population deviation (n), as `scipy.stats.zscore` computes it.
pub const DETECT_ESTIMATOR: StdDevEstimator = StdDevEstimator::Population;

#[derive(Debug, Parser)]
#[command(name = "detect-outliers")]
#[command(about = "Detect outliers per column and write scatter data and outlier listings")]
pub struct DetectArgs {
    /// Input dataset file
    pub input_file: PathBuf,

    /// Outlier detection method: z-score or iqr
    pub method: String,

    /// Folder for the per-column outputs, created if missing
    pub output_folder: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    /// Z-score threshold [default: 3]
    #[arg(long)]
    pub z_threshold: Option<f64>,

    /// IQR fence multiplier [default: 1.5]
    #[arg(long)]
    pub iqr_multiplier: Option<f64>,

    /// Use the sample standard deviation (divide by n - 1) for z-scores
    #[arg(long)]
    pub sample_std: bool,
}

impl DetectArgs {
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            method: Some(self.method.clone()),
            z_threshold: self.z_threshold,
            iqr_multiplier: self.iqr_multiplier,
            std_estimator: self.sample_std.then(|| "sample".to_string()),
            ..CliOverrides::default()
        };
        self.input.apply(&mut overrides);
        overrides
    }
}

pub fn run(args: DetectArgs) -> anyhow::Result<String> {
    execute(&args).with_context(|| format!("detecting outliers in {}", args.input_file.display()))
}

fn execute(args: &DetectArgs) -> Result<String, PipelineError> {
    let config = common::load_config(&args.overrides())?;
    let outliers = &config.outliers;

    let method_name = outliers.method.as_deref().unwrap_or(&args.method);
    let method = method_name
        .parse::<MethodKind>()?
        .with_params(outliers.effective_z_threshold(), outliers.effective_iqr_multiplier())?;

    let request = DetectRequest {
        input: args.input_file.clone(),
        output_folder: args.output_folder.clone(),
        load: common::load_options(&config)?,
        method,
        engine: OutlierEngine::new().with_estimator(common::std_estimator(&config, DETECT_ESTIMATOR)?),
    };
    tracing::debug!(?request, "running detect pipeline");

    let summary = detect::run(&request)?;
    Ok(format!(
        "Outlier data for {} columns ({} outliers) saved to {}",
        summary.columns,
        summary.total_outliers,
        summary.output_folder.display()
    ))
}
