//! Structured logging setup.
//!
//! Logs go to stderr; stdout belongs to the host protocol. The filter comes
//! from `RUST_LOG` and defaults to `info`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init_logging() {
    let _ = try_init_logging();
}

pub fn try_init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}
