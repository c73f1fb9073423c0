//! Temperature summary from a start date, optionally up to an end date
//!
//! Dates are taken verbatim from the path and compared as strings against
//! the stored `YYYY-MM-DD` values. Nothing is validated: a malformed date
//! just matches nothing, and the summary comes back as nulls.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::db::MeasurementRepo;
use crate::http::context::RequestContext;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::TemperatureStats;

/// GET /api/v1.0/{start}
async fn from_start(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let session = ctx.session().await?;
    let stats = MeasurementRepo::new(session, &state.queries)
        .temperature_stats(&start, None)
        .await?;
    Ok(Json(vec![stats]))
}

/// GET /api/v1.0/{start}/{end}
async fn between(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let session = ctx.session().await?;
    let stats = MeasurementRepo::new(session, &state.queries)
        .temperature_stats(&start, Some(&end))
        .await?;
    Ok(Json(vec![stats]))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1.0/{start}", get(from_start))
        .route("/api/v1.0/{start}/{end}", get(between))
}
