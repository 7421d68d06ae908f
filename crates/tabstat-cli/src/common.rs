//! Arguments and helpers shared by every binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use tabstat_analysis::dataset::LoadOptions;
use tabstat_analysis::stats::StdDevEstimator;
use tabstat_core::config::{CliOverrides, TabstatConfig};
use tabstat_core::errors::{ConfigError, PipelineError, TabstatErrorCode};

/// Input format flags.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Column delimiter: a single character, or `\t` / `tab` for TAB [default: tab]
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Treat the first line as data and name columns `Feature 1..n`
    #[arg(long)]
    pub no_header: bool,
}

impl InputArgs {
    /// Flags only override the config when given.
    pub fn apply(&self, overrides: &mut CliOverrides) {
        overrides.delimiter = self.delimiter.clone();
        overrides.no_header = self.no_header.then_some(true);
    }
}

/// Resolve configuration from the working directory, the environment and
/// the given flags.
pub fn load_config(overrides: &CliOverrides) -> Result<TabstatConfig, ConfigError> {
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    TabstatConfig::load(&root, Some(overrides))
}

pub fn load_options(config: &TabstatConfig) -> Result<LoadOptions, ConfigError> {
    Ok(LoadOptions {
        delimiter: config.io.effective_delimiter()?,
        has_header: config.io.effective_has_header(),
    })
}

/// Configured estimator, or the tool's own default when none is set.
pub fn std_estimator(config: &TabstatConfig, default: StdDevEstimator) -> Result<StdDevEstimator, ConfigError> {
    config.outliers.std_estimator.as_deref().map_or(Ok(default), str::parse)
}

/// Print the outcome and pick the exit status.
///
/// Success prints the message to stdout. Failure prints
/// `error: [CODE] message` to stderr and exits with 1.
pub fn finish(result: anyhow::Result<String>) -> ExitCode {
    match result {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: [{}] {err:#}", error_code(&err));
            ExitCode::FAILURE
        }
    }
}

/// Code of the first pipeline error in the chain.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|e| e.downcast_ref::<PipelineError>())
        .map_or("ERROR", |e| e.error_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use tabstat_core::errors::LoadError;

    #[test]
    fn test_error_code_found_through_context() {
        let err: Result<(), PipelineError> = Err(PipelineError::from(LoadError::Empty {
            path: "x.tsv".into(),
        }));
        let err = err.context("loading input").unwrap_err();
        assert_eq!(error_code(&err), "LOAD_ERROR");
    }

    #[test]
    fn test_error_code_fallback() {
        assert_eq!(error_code(&anyhow::anyhow!("boom")), "ERROR");
    }

    #[test]
    fn test_input_args_only_override_when_set() {
        let mut overrides = CliOverrides::default();
        InputArgs::default().apply(&mut overrides);
        assert!(overrides.delimiter.is_none());
        assert!(overrides.no_header.is_none());

        InputArgs {
            delimiter: Some(",".to_string()),
            no_header: true,
        }
        .apply(&mut overrides);
        assert_eq!(overrides.delimiter.as_deref(), Some(","));
        assert_eq!(overrides.no_header, Some(true));
    }

    #[test]
    fn test_std_estimator_from_config() {
        let mut config = TabstatConfig::default();
        assert_eq!(std_estimator(&config, StdDevEstimator::Sample).unwrap(), StdDevEstimator::Sample);
        assert_eq!(
            std_estimator(&config, StdDevEstimator::Population).unwrap(),
            StdDevEstimator::Population
        );
        config.outliers.std_estimator = Some("sample".to_string());
        assert_eq!(
            std_estimator(&config, StdDevEstimator::Population).unwrap(),
            StdDevEstimator::Sample
        );
        config.outliers.std_estimator = Some("robust".to_string());
        assert!(std_estimator(&config, StdDevEstimator::Sample).is_err());
    }
}
