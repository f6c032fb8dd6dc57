//! Process-wide tracing setup.
//!
//! Initialized once at binary start; core logic only emits through the
//! `tracing` macros and never touches subscriber state.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber: `RUST_LOG`-style filtering with an
/// `info` default, compact output to stderr.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
