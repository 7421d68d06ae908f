//! Tool pipelines. Each one loads a dataset, computes, and writes its
//! outputs; nothing is shared between runs.

pub mod clean;
pub mod detect;
pub mod distribution;

use std::path::{Path, PathBuf};

pub use clean::{CleanRequest, CleanSummary};
pub use detect::{DetectRequest, DetectSummary};
pub use distribution::{DistributionRequest, DistributionSummary};

/// Resolve `output` against the folder holding `input`. Absolute outputs
/// are returned as is.
pub fn resolve_beside(input: &Path, output: &Path) -> PathBuf {
    if output.is_absolute() {
        return output.to_path_buf();
    }
    match input.parent() {
        Some(folder) => folder.join(output),
        None => output.to_path_buf(),
    }
}
