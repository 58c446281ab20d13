//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing.
///
/// JSON lines with flattened event fields, filtered via `RUST_LOG`
/// (default `info`). Safe to call multiple times; only the first call
/// installs the subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_target(false)
        .try_init();
}
