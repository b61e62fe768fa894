//! Diagnostic tracing on stderr.
//!
//! Stdout is reserved for the `pi = ...` and `elapsed time = ...` lines, so
//! everything emitted through `tracing` goes to stderr instead.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`.
///
/// ```bash
/// RUST_LOG=monte_carlo_pi=debug monte_carlo_pi 10000000 8
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
