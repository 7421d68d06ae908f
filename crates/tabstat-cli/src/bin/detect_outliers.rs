//! `detect-outliers` binary.

use std::process::ExitCode;

use clap::Parser;
use tabstat_cli::detect::{self, DetectArgs};

fn main() -> ExitCode {
    tabstat_core::tracing::init_tracing();
    tabstat_cli::finish(detect::run(DetectArgs::parse()))
}
