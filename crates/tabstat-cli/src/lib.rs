//! tabstat-cli: argument parsing and run glue for the three binaries.
//!
//! Each command parses its arguments with `clap`, resolves the layered
//! configuration, builds a pipeline request and returns the line printed
//! on success.

pub mod clean;
pub mod common;
pub mod detect;
pub mod draw;

pub use common::finish;
