//! Per-request context
//!
//! [`session_scope`] wraps every route: it creates a [`RequestContext`],
//! hands it to the handler through request extensions, and once the handler
//! has produced a response (success or error) closes whatever session the
//! handler opened.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::OnceCell;

use super::server::AppState;
use crate::db::{DbError, Session, SessionManager};

/// Explicit request context carrying the request's session
#[derive(Clone)]
pub struct RequestContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    sessions: SessionManager,
    session: OnceCell<Session>,
}

impl RequestContext {
    pub fn new(sessions: SessionManager) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                sessions,
                session: OnceCell::new(),
            }),
        }
    }

    /// The session bound to this request.
    ///
    /// Opened on first call; later calls return the same session.
    pub async fn session(&self) -> Result<&Session, DbError> {
        self.inner
            .session
            .get_or_try_init(|| self.inner.sessions.open())
            .await
    }

    #[cfg(test)]
    fn has_session(&self) -> bool {
        self.inner.session.initialized()
    }

    /// End the request: close the session if one was opened.
    ///
    /// If a clone of the context is still alive somewhere the session is
    /// closed when that clone drops instead.
    pub fn finish(self) {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => {
                if let Some(session) = inner.session.into_inner() {
                    session.close();
                }
            }
            Err(shared) => {
                tracing::warn!(
                    holders = Arc::strong_count(&shared),
                    "Request context outlived its request; session release deferred"
                );
            }
        }
    }
}

/// Middleware binding one [`RequestContext`] to each request.
pub async fn session_scope(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = RequestContext::new(state.sessions.clone());
    req.extensions_mut().insert(ctx.clone());

    let response = next.run(req).await;

    ctx.finish();
    response
}
