//! `clean-outliers` binary.

use std::process::ExitCode;

use clap::Parser;
use tabstat_cli::clean::{self, CleanArgs};

fn main() -> ExitCode {
    tabstat_core::tracing::init_tracing();
    tabstat_cli::finish(clean::run(CleanArgs::parse()))
}
