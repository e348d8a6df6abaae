//! Logging setup for CourseBuddy
//!
//! `RUST_LOG` takes precedence; otherwise the CLI verbosity picks the level.

use tracing_subscriber::EnvFilter;

use crate::cli::Verbosity;

/// Build the filter for a verbosity level, honouring `RUST_LOG` if set
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
