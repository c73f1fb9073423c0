//! Precipitation over the trailing year

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::MeasurementRepo;
use crate::http::context::RequestContext;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Date → precipitation. Keys are unique, so a repeated date keeps the
/// value of the last row read.
pub type PrecipitationResponse = BTreeMap<String, Option<f64>>;

/// GET /api/v1.0/precipitation
async fn precipitation(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<Json<PrecipitationResponse>, ApiError> {
    let session = ctx.session().await?;
    let repo = MeasurementRepo::new(session, &state.queries);

    let Some(cutoff) = repo.window_cutoff().await? else {
        return Ok(Json(PrecipitationResponse::new()));
    };

    let rows = repo.precipitation_after(&cutoff).await?;
    tracing::debug!(rows = rows.len(), %cutoff, "Precipitation rows");

    Ok(Json(rows.into_iter().collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/v1.0/precipitation", get(precipitation))
}
