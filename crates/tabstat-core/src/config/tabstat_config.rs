//! Top-level tabstat configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DistributionConfig, IoConfig, OutlierConfig};
use crate::constants::PROJECT_CONFIG_FILE_NAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`TABSTAT_*`)
/// 3. Project config (`tabstat.toml` in the working directory)
/// 4. User config (`~/.tabstat/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TabstatConfig {
    pub io: IoConfig,
    pub outliers: OutlierConfig,
    pub distribution: DistributionConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub delimiter: Option<String>,
    pub no_header: Option<bool>,
    pub method: Option<String>,
    pub z_threshold: Option<f64>,
    pub iqr_multiplier: Option<f64>,
    pub std_estimator: Option<String>,
    pub drop_missing: Option<bool>,
    pub scaling: Option<String>,
    pub bins: Option<String>,
    pub curve_points: Option<usize>,
}

impl TabstatConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config. A broken user file is
        // fatal only when it fails to parse.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &TabstatConfig) -> Result<(), ConfigError> {
        if let Some(t) = config.outliers.z_threshold {
            if !(t.is_finite() && t > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "outliers.z_threshold".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        if let Some(k) = config.outliers.iqr_multiplier {
            if !(k.is_finite() && k >= 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "outliers.iqr_multiplier".to_string(),
                    message: "must be a non-negative finite number".to_string(),
                });
            }
        }
        if let Some(passes) = config.outliers.max_passes {
            if passes == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "outliers.max_passes".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(points) = config.distribution.curve_points {
            if points < 2 {
                return Err(ConfigError::ValidationFailed {
                    field: "distribution.curve_points".to_string(),
                    message: "must be at least 2".to_string(),
                });
            }
        }
        config.io.effective_delimiter()?;
        Ok(())
    }

    /// Returns the user config path: `~/.tabstat/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut TabstatConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: TabstatConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut TabstatConfig, other: &TabstatConfig) {
        // IO
        if other.io.delimiter.is_some() {
            base.io.delimiter = other.io.delimiter.clone();
        }
        if other.io.no_header.is_some() {
            base.io.no_header = other.io.no_header;
        }

        // Outliers
        if other.outliers.method.is_some() {
            base.outliers.method = other.outliers.method.clone();
        }
        if other.outliers.z_threshold.is_some() {
            base.outliers.z_threshold = other.outliers.z_threshold;
        }
        if other.outliers.iqr_multiplier.is_some() {
            base.outliers.iqr_multiplier = other.outliers.iqr_multiplier;
        }
        if other.outliers.std_estimator.is_some() {
            base.outliers.std_estimator = other.outliers.std_estimator.clone();
        }
        if other.outliers.drop_missing.is_some() {
            base.outliers.drop_missing = other.outliers.drop_missing;
        }
        if other.outliers.max_passes.is_some() {
            base.outliers.max_passes = other.outliers.max_passes;
        }

        // Distribution
        if other.distribution.scaling.is_some() {
            base.distribution.scaling = other.distribution.scaling.clone();
        }
        if other.distribution.bins.is_some() {
            base.distribution.bins = other.distribution.bins.clone();
        }
        if other.distribution.curve_points.is_some() {
            base.distribution.curve_points = other.distribution.curve_points;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TABSTAT_IO_DELIMITER`, `TABSTAT_OUTLIERS_Z_THRESHOLD`, etc.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(config: &mut TabstatConfig) {
        if let Ok(val) = std::env::var("TABSTAT_IO_DELIMITER") {
            config.io.delimiter = Some(val);
        }
        if let Ok(val) = std::env::var("TABSTAT_IO_NO_HEADER") {
            if let Ok(v) = val.parse::<bool>() {
                config.io.no_header = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TABSTAT_OUTLIERS_METHOD") {
            config.outliers.method = Some(val);
        }
        if let Ok(val) = std::env::var("TABSTAT_OUTLIERS_Z_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.outliers.z_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TABSTAT_OUTLIERS_IQR_MULTIPLIER") {
            if let Ok(v) = val.parse::<f64>() {
                config.outliers.iqr_multiplier = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TABSTAT_OUTLIERS_STD_ESTIMATOR") {
            config.outliers.std_estimator = Some(val);
        }
        if let Ok(val) = std::env::var("TABSTAT_DISTRIBUTION_SCALING") {
            config.distribution.scaling = Some(val);
        }
        if let Ok(val) = std::env::var("TABSTAT_DISTRIBUTION_BINS") {
            config.distribution.bins = Some(val);
        }
        if let Ok(val) = std::env::var("TABSTAT_DISTRIBUTION_CURVE_POINTS") {
            if let Ok(v) = val.parse::<usize>() {
                config.distribution.curve_points = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut TabstatConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.delimiter {
            config.io.delimiter = Some(v.clone());
        }
        if let Some(v) = cli.no_header {
            config.io.no_header = Some(v);
        }
        if let Some(ref v) = cli.method {
            config.outliers.method = Some(v.clone());
        }
        if let Some(v) = cli.z_threshold {
            config.outliers.z_threshold = Some(v);
        }
        if let Some(v) = cli.iqr_multiplier {
            config.outliers.iqr_multiplier = Some(v);
        }
        if let Some(ref v) = cli.std_estimator {
            config.outliers.std_estimator = Some(v.clone());
        }
        if let Some(v) = cli.drop_missing {
            config.outliers.drop_missing = Some(v);
        }
        if let Some(ref v) = cli.scaling {
            config.distribution.scaling = Some(v.clone());
        }
        if let Some(ref v) = cli.bins {
            config.distribution.bins = Some(v.clone());
        }
        if let Some(v) = cli.curve_points {
            config.distribution.curve_points = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.tabstat/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".tabstat"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
