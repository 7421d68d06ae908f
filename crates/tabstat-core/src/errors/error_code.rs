//! TabstatErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that the command-line tools print alongside the message.
pub trait TabstatErrorCode {
    /// Returns the error code string (e.g., "LOAD_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
pub const LOAD_ERROR: &str = "LOAD_ERROR";
pub const WRITE_ERROR: &str = "WRITE_ERROR";
pub const COMPUTE_ERROR: &str = "COMPUTE_ERROR";
