//! Station list

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::StationRepo;
use crate::http::context::RequestContext;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /api/v1.0/stations
async fn stations(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<Json<Vec<String>>, ApiError> {
    let session = ctx.session().await?;
    let ids = StationRepo::new(session, &state.queries).ids().await?;
    Ok(Json(ids))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/v1.0/stations", get(stations))
}
