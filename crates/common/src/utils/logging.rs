use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset. The console owns stdout, so
/// only warnings and errors show up unless asked for.
const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing subscriber with compact human-readable output.
/// - Respects `RUST_LOG` if set
/// - Writes to stderr so log lines never interleave with menu output
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output on stderr.
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(io::stderr)
        .try_init();
}
