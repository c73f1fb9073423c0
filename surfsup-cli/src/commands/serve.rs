//! HTTP server command
//!
//! Opens the database, reflects the schema, then serves until shutdown.
//! Flags override values from the config file.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use surfsup_server::http::{run_server, AppState};
use surfsup_server::ApiConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// SQLite database file (default: Resources/hawaii.sqlite)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Station reported by /api/v1.0/tobs
    #[arg(long, value_name = "ID")]
    pub tobs_station: Option<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn apply(self, mut config: ApiConfig) -> Result<ApiConfig> {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(path) = self.database {
            config.database.path = path;
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        if let Some(station) = self.tobs_station {
            config.climate.tobs_station = station;
        }
        config.server.cors_permissive |= self.cors_permissive;

        config.validate().context("Invalid serve options")?;
        Ok(config)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: ApiConfig) -> Result<()> {
    let config = args.apply(config)?;

    tracing::info!(
        "Starting surfsup v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server.bind
    );

    let state = AppState::from_config(&config).await.with_context(|| {
        format!(
            "Failed to open climate database {}",
            config.database.path.display()
        )
    })?;

    // Run server (blocks until shutdown)
    run_server(state, &config.server)
        .await
        .context("Server error")?;

    Ok(())
}
