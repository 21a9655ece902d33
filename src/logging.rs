//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; user-facing messages use
//! `cli::output`. Verbosity is read from `AUTHKEEPER_LOG` using
//! `EnvFilter` syntax (e.g. `AUTHKEEPER_LOG=authkeeper=debug`).

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "AUTHKEEPER_LOG";

/// Filter used when `AUTHKEEPER_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
