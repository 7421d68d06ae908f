//! tabstat-core: errors, configuration, tracing and constants shared by the
//! tabstat analysis library and its command-line tools.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
