//! Schema inspection command
//!
//! Runs the same startup path as `serve` (open, reflect, prepare), then
//! prints what was mapped plus a short summary of the data.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use surfsup_server::db::{MeasurementRepo, Schema, Station, StationRepo};
use surfsup_server::http::AppState;
use surfsup_server::ApiConfig;

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// SQLite database file (default: Resources/hawaii.sqlite)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Include every station record in the output
    #[arg(long)]
    pub stations: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    database: PathBuf,
    schema: Schema,
    measurements: MeasurementSummary,
    station_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    stations: Option<Vec<Station>>,
}

#[derive(Debug, Serialize)]
struct MeasurementSummary {
    count: i64,
    first_date: Option<String>,
    last_date: Option<String>,
}

pub async fn run_inspect(args: InspectArgs, mut config: ApiConfig) -> Result<()> {
    if let Some(path) = args.database {
        config.database.path = path;
    }

    let state = AppState::from_config(&config).await.with_context(|| {
        format!(
            "Failed to open climate database {}",
            config.database.path.display()
        )
    })?;

    let session = state
        .sessions
        .open()
        .await
        .context("Failed to open database session")?;

    let measurements = MeasurementRepo::new(&session, &state.queries);
    let (first_date, last_date) = measurements.date_range().await?;
    let count = measurements.count().await?;

    let stations = StationRepo::new(&session, &state.queries);
    let station_count = stations.count().await?;
    let station_list = if args.stations {
        Some(stations.list().await?)
    } else {
        None
    };

    session.close();

    let report = Report {
        database: config.database.path.clone(),
        schema: state.schema.clone(),
        measurements: MeasurementSummary {
            count,
            first_date,
            last_date,
        },
        station_count,
        stations: station_list,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
