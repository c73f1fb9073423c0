//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default, on the port the server is bound to
//! - Tracing middleware
//! - One database session per request
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::{middleware, Router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::context::session_scope;
use super::routes;
use crate::config::{ApiConfig, ServerSection};
use crate::db::{pool, Queries, Schema, SessionManager};

/// Shared application state
pub struct AppState {
    pub sessions: SessionManager,
    pub schema: Schema,
    pub queries: Queries,
    /// Station reported by `/api/v1.0/tobs`
    pub tobs_station: String,
}

impl AppState {
    /// Reflect the schema on `pool` and prepare every query.
    pub async fn new(pool: SqlitePool, tobs_station: impl Into<String>) -> crate::Result<Self> {
        let schema = Schema::reflect(&pool).await?;
        let queries = Queries::prepare(&schema)?;

        Ok(Self {
            sessions: SessionManager::new(pool),
            schema,
            queries,
            tobs_station: tobs_station.into(),
        })
    }

    /// Open the configured database and build state from it.
    ///
    /// Any failure here is fatal: missing file, missing table, missing column.
    pub async fn from_config(config: &ApiConfig) -> crate::Result<Self> {
        let pool = pool::create_pool_with_options(
            &config.database.path,
            config.database.max_connections,
        )
        .await?;

        tracing::info!(path = %config.database.path.display(), "Database opened");
        Self::new(pool, config.climate.tobs_station.clone()).await
    }
}

/// Browser origins served from this machine on `port`.
fn localhost_origins(port: u16) -> Vec<HeaderValue> {
    ["localhost", "127.0.0.1"]
        .iter()
        .filter_map(|host| HeaderValue::try_from(format!("http://{host}:{port}")).ok())
        .collect()
}

/// Build the application router with all routes
pub fn build_router(state: Arc<AppState>, config: &ServerSection) -> Router {
    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        let port = config.bind.port();
        tracing::debug!(port, "CORS: localhost origins only");
        CorsLayer::new()
            .allow_origin(localhost_origins(port))
            .allow_methods([Method::GET])
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::home::router())
        .merge(routes::precipitation::router())
        .merge(routes::stations::router())
        .merge(routes::tobs::router())
        .merge(routes::temperature::router())
        .layer(middleware::from_fn_with_state(Arc::clone(&state), session_scope))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::default();
/// let state = AppState::from_config(&config).await?;
/// run_server(state, &config.server).await?;
/// ```
pub async fn run_server(state: AppState, config: &ServerSection) -> crate::Result<()> {
    let state = Arc::new(state);
    let app = build_router(Arc::clone(&state), config);

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("Server listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.sessions.pool().close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
