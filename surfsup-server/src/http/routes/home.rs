//! Index page

use axum::{response::Html, routing::get, Router};

const INDEX: &str = concat!(
    "Welcome to the Climate App API!<br/>",
    "Available Routes:<br/>",
    "/api/v1.0/precipitation<br/>",
    "/api/v1.0/stations<br/>",
    "/api/v1.0/tobs<br/>",
    "/api/v1.0/&lt;start&gt;<br/>",
    "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
);

/// GET /
async fn home() -> Html<&'static str> {
    Html(INDEX)
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}
