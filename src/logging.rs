//! Structured log output.
//!
//! Action events (`skip`, `delete`, `relocate`, `remove_dir`, `summary`, ...)
//! are emitted with `tracing`. This module installs the subscriber that writes
//! them to stderr, leaving stdout to the human or JSON output.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Default filter directive for a given `-v` count.
#[must_use]
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    format!("bin_flatten={level}")
}

/// Install the global log subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity-derived default.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn init(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert_eq!(default_directive(0), "bin_flatten=warn");
        assert_eq!(default_directive(1), "bin_flatten=info");
        assert_eq!(default_directive(2), "bin_flatten=debug");
        assert_eq!(default_directive(7), "bin_flatten=trace");
    }
}
