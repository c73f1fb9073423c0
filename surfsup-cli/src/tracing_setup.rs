//! Console logging for `surfsup`
//!
//! At the default `info` level `serve` reports the opened database, the
//! listen address and shutdown. `--debug` adds one span per HTTP request
//! (`tower_http::trace`), the `Session opened` / `Session closed` events
//! around each database-backed route, and the trailing-year cutoff.
//!
//! Usage:
//!   surfsup --debug serve
//!   RUST_LOG=surfsup_server::db=debug surfsup serve    # sessions and queries only
//!   RUST_LOG=tower_http=debug surfsup serve            # request spans only
//!
//! `RUST_LOG` takes precedence over `--debug` when set.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets the filter to debug if RUST_LOG is unset)
    pub debug: bool,
}

/// Filter used when `RUST_LOG` is unset.
fn default_directives(debug: bool) -> &'static str {
    if debug {
        "info,surfsup=debug,surfsup_server=debug,tower_http=debug"
    } else {
        "info"
    }
}

/// Initialize console tracing
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_directives_parse_and_scope_to_service() {
        let directives = default_directives(true);
        assert!(EnvFilter::try_new(directives).is_ok());
        assert!(directives.contains("surfsup_server=debug"));
        assert!(directives.contains("tower_http=debug"));
        assert!(!directives.contains("sqlx"));
        assert_eq!(default_directives(false), "info");
    }
}
