//! Output errors.

use std::path::PathBuf;

use super::error_code::{self, TabstatErrorCode};

/// Errors that can occur while writing datasets, reports or plot data.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("IO error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error writing {}: {message}", path.display())]
    Csv { path: PathBuf, message: String },

    #[error("Serialization error writing {}: {message}", path.display())]
    Serialization { path: PathBuf, message: String },
}

impl TabstatErrorCode for WriteError {
    fn error_code(&self) -> &'static str {
        error_code::WRITE_ERROR
    }
}
