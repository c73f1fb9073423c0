//! surfsup CLI - climate observation API
//!
//! - `serve`: run the read-only HTTP/JSON API over the climate database
//! - `inspect`: print the reflected schema and a summary of the data

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use surfsup_server::ApiConfig;

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "surfsup",
    author,
    version,
    about = "Read-only JSON API over the Hawaii climate observation database"
)]
struct Cli {
    /// Config file (default: ./surfsup.toml when present)
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Reflect the database schema and summarize its contents as JSON
    Inspect(commands::inspect::InspectArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    let config = ApiConfig::discover(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await?,
        Commands::Inspect(args) => commands::run_inspect(args, config).await?,
    }
    Ok(())
}
