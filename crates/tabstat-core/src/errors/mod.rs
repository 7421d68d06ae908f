//! Error handling for tabstat.
//! One error enum per subsystem, `thiserror` only.

pub mod compute_error;
pub mod config_error;
pub mod error_code;
pub mod load_error;
pub mod pipeline_error;
pub mod write_error;

pub use compute_error::ComputeError;
pub use config_error::ConfigError;
pub use error_code::TabstatErrorCode;
pub use load_error::LoadError;
pub use pipeline_error::PipelineError;
pub use write_error::WriteError;
