//! Tracing subscriber setup for the command-line tool.
//!
//! Logs go to stderr so JSON results on stdout stay machine-readable.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "tonecoach=debug";

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// Subsequent calls are no-ops.
pub fn init(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
