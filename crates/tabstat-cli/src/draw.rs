//! `draw-dist`: histogram and normal-curve data per column, plus the
//! feature statistics table.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tabstat_analysis::distribution::BinRule;
use tabstat_analysis::pipeline::{distribution, DistributionRequest};
use tabstat_analysis::scaling::ScalingMethod;
use tabstat_core::config::CliOverrides;
use tabstat_core::errors::PipelineError;

use crate::common::{self, InputArgs};

#[derive(Debug, Parser)]
#[command(name = "draw-dist")]
#[command(about = "Write distribution histograms, fitted normal curves and feature statistics for a delimited file")]
pub struct DrawArgs {
    /// Input dataset file
    pub input_file: PathBuf,

    /// Folder for the distribution data and feature statistics, created if missing
    pub output_folder: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    /// Scaling applied to every column first: min-max, z-score or log
    #[arg(long)]
    pub scaling_method: Option<String>,

    /// Histogram bin rule: sqrt or fd [default: sqrt]
    #[arg(long)]
    pub bins: Option<String>,

    /// Points sampled along each normal curve [default: 1000]
    #[arg(long)]
    pub curve_points: Option<usize>,
}

impl DrawArgs {
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            scaling: self.scaling_method.clone(),
            bins: self.bins.clone(),
            curve_points: self.curve_points,
            ..CliOverrides::default()
        };
        self.input.apply(&mut overrides);
        overrides
    }
}

pub fn run(args: DrawArgs) -> anyhow::Result<String> {
    execute(&args).with_context(|| format!("drawing distributions for {}", args.input_file.display()))
}

fn execute(args: &DrawArgs) -> Result<String, PipelineError> {
    let config = common::load_config(&args.overrides())?;
    let dist = &config.distribution;

    let scaling = dist.scaling.as_deref().map(str::parse::<ScalingMethod>).transpose()?;
    let bins: BinRule = dist.effective_bins().parse()?;

    let request = DistributionRequest {
        input: args.input_file.clone(),
        output_folder: args.output_folder.clone(),
        load: common::load_options(&config)?,
        scaling,
        bins,
        curve_points: dist.effective_curve_points(),
    };
    tracing::debug!(?request, "running distribution pipeline");

    let summary = distribution::run(&request)?;
    Ok(format!(
        "Distribution data for {} columns and feature statistics saved to {}",
        summary.plots,
        summary.output_folder.display()
    ))
}
