//! Diagnostic tracing for the normalizer.
//!
//! Engine and adapters emit `tracing` events (store writes and id generation at
//! `debug`, resolver rewrites at `trace`). Library callers install their own
//! subscriber; the CLI calls [`init`].

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset.
/// Output: stderr, compact format, so stdout stays clean JSON.
///
/// # Example
/// ```bash
/// RUST_LOG=normalizer=debug normalizer process screen.json
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
