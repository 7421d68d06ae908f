//! Dataset loading errors.

use std::path::PathBuf;

use super::error_code::{self, TabstatErrorCode};

/// Errors that can occur while reading a delimited file into a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File '{}' not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed delimited data in {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Line {line} has {found} fields, expected {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("File {} is empty", path.display())]
    Empty { path: PathBuf },
}

impl TabstatErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => error_code::FILE_NOT_FOUND,
            _ => error_code::LOAD_ERROR,
        }
    }
}
