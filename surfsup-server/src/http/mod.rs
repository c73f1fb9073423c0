//! HTTP server layer
//!
//! Axum server with:
//! - Read-only climate routes under `/api/v1.0`
//! - Request tracing and localhost CORS
//! - An explicit per-request context holding the database session
//! - JSON error responses

pub mod context;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use context::{session_scope, RequestContext};
pub use error::ApiError;
pub use server::{build_router, run_server, AppState};
