//! `draw-dist` binary.

use std::process::ExitCode;

use clap::Parser;
use tabstat_cli::draw::{self, DrawArgs};

fn main() -> ExitCode {
    tabstat_core::tracing::init_tracing();
    tabstat_cli::finish(draw::run(DrawArgs::parse()))
}
