//! Temperature observations for one station over the trailing year
//!
//! The station is fixed by configuration (default `USC00519397`). It is not
//! recomputed as the most active station.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::MeasurementRepo;
use crate::http::context::RequestContext;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// One `{date: tobs}` object per observation, in row order
pub type TobsResponse = Vec<BTreeMap<String, Option<f64>>>;

/// GET /api/v1.0/tobs
async fn tobs(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<Json<TobsResponse>, ApiError> {
    let session = ctx.session().await?;
    let repo = MeasurementRepo::new(session, &state.queries);

    let Some(cutoff) = repo.window_cutoff().await? else {
        return Ok(Json(Vec::new()));
    };

    let rows = repo.tobs_after(&cutoff, &state.tobs_station).await?;

    Ok(Json(
        rows.into_iter()
            .map(|(date, value)| BTreeMap::from([(date, value)]))
            .collect(),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/v1.0/tobs", get(tobs))
}
