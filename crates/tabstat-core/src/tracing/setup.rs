//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `TABSTAT_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn,tabstat_core=info,tabstat_analysis=info,tabstat_cli=info";

/// Initialize the tabstat logging system.
///
/// Reads the `TABSTAT_LOG` environment variable for per-crate log levels,
/// e.g. `TABSTAT_LOG=tabstat_analysis=debug`. Events go to stderr so the
/// tools' stdout stays reserved for their result line.
///
/// Idempotent: later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TABSTAT_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
