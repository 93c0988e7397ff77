//! Diagnostic logging for the CLI, controlled by `RUST_LOG` and written to stderr.
//!
//! Run output (traces, results) goes to stdout and is not affected by the filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=tmi=trace tmi-cli run 0011
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
