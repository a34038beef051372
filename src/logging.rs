//! Logging configuration for flight-report.
//!
//! Logs go to stderr so that stdout carries only report output.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "flight_report=debug,warn"
    } else {
        "warn"
    }
}

/// Initializes stderr logging. `RUST_LOG` takes precedence over `verbose`.
pub fn init_stderr_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
