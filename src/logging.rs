//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout stays usable for `--stdout` reports.

use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable consulted when `RUST_LOG` is unset.
pub const LOG_ENV: &str = "GSIT_LOGLEVEL";

/// Pick the filter directive: `RUST_LOG`, then [`LOG_ENV`], then a default
/// derived from the verbosity flags.
pub fn log_filter(
    rust_log: Option<String>,
    gsit_log: Option<String>,
    verbose: bool,
    quiet: bool,
) -> String {
    rust_log.or(gsit_log).unwrap_or_else(|| {
        let level = if verbose {
            "debug"
        } else if quiet {
            "error"
        } else {
            "warn"
        };
        format!("{}={}", env!("CARGO_CRATE_NAME"), level)
    })
}

/// Colors only for a terminal, and never when `NO_COLOR` is set.
pub fn use_ansi(is_terminal: bool, no_color: Option<String>) -> bool {
    is_terminal && no_color.map_or(true, |v| v.is_empty())
}

/// Install the global stderr subscriber.
pub fn initialize_logging(verbose: bool, quiet: bool) {
    let directive = log_filter(
        std::env::var("RUST_LOG").ok(),
        std::env::var(LOG_ENV).ok(),
        verbose,
        quiet,
    );

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(use_ansi(
            std::io::stderr().is_terminal(),
            std::env::var("NO_COLOR").ok(),
        ))
        .with_filter(EnvFilter::new(directive));

    // A subscriber may already be installed when embedded in another binary.
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
