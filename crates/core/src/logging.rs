//! Structured logging infrastructure for SkyCrew.
//!
//! Library crates only emit `tracing` events; binaries pick an output format
//! once at startup through this module. Events go to stderr so command output
//! on stdout stays machine readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system with human readable output.
///
/// Log level can be configured via the `RUST_LOG` environment variable.
/// If not set, defaults to `info` level.
///
/// # Example
/// ```no_run
/// use skycrew_core::logging;
///
/// logging::init();
/// tracing::info!("Coordinator started");
/// ```
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();
}

/// Initialize the logging system with JSON output for log aggregation.
///
/// # Example
/// ```no_run
/// use skycrew_core::logging;
///
/// logging::init_json();
/// tracing::info!(project_id = "PRJ001", "Assignment committed");
/// ```
pub fn init_json() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();
}

/// Initialize logging according to the `[logging]` configuration table.
pub fn init_with(config: &LoggingConfig) {
    if config.json {
        init_json();
    } else {
        init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_doesnt_panic() {
        // The global subscriber can only be installed once per process, so
        // only the filter construction is exercised here.
        let _ = env_filter();
    }
}
