//! Pipeline errors.

use super::error_code::TabstatErrorCode;
use super::{ComputeError, ConfigError, LoadError, WriteError};

/// Errors that can end a tool run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    #[error("Compute error: {0}")]
    Compute(#[from] ComputeError),
}

impl TabstatErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Load(e) => e.error_code(),
            Self::Write(e) => e.error_code(),
            Self::Compute(e) => e.error_code(),
        }
    }
}
