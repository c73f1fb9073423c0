//! Request-scoped database sessions
//!
//! A [`Session`] owns one pooled connection for the lifetime of a single
//! HTTP request. Dropping it hands the connection back to the pool, so a
//! session is released exactly once however the request ends.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};
use tokio::sync::{Mutex, MutexGuard};

use super::DbError;

#[derive(Debug, Default)]
struct Counters {
    next_id: AtomicU64,
    open: AtomicUsize,
}

/// Hands out sessions backed by the shared pool
#[derive(Clone)]
pub struct SessionManager {
    pool: SqlitePool,
    counters: Arc<Counters>,
}

impl SessionManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a connection and wrap it in a new session.
    ///
    /// Waits for a free connection when the pool is exhausted.
    pub async fn open(&self) -> Result<Session, DbError> {
        let conn = self.pool.acquire().await?;
        let id = self.counters.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.counters.open.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(session_id = id, "Session opened");

        Ok(Session {
            id,
            conn: Mutex::new(conn),
            counters: Arc::clone(&self.counters),
        })
    }

    /// Number of sessions created and not yet closed.
    pub fn open_sessions(&self) -> usize {
        self.counters.open.load(Ordering::SeqCst)
    }
}

/// Unit of work bound to one request
pub struct Session {
    id: u64,
    conn: Mutex<PoolConnection<Sqlite>>,
    counters: Arc<Counters>,
}

impl Session {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Lock the session's connection for one query.
    ///
    /// Use as `&mut **guard` to get an executor.
    pub async fn connection(&self) -> MutexGuard<'_, PoolConnection<Sqlite>> {
        self.conn.lock().await
    }

    /// Close the session, returning its connection to the pool.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.counters.open.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!(session_id = self.id, "Session closed");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::time::Duration;

    async fn pool(max: u32) -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(max)
            .acquire_timeout(Duration::from_millis(200))
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn open_and_close_are_counted() {
        let manager = SessionManager::new(pool(2).await);
        assert_eq!(manager.open_sessions(), 0);

        let a = manager.open().await.unwrap();
        let b = manager.open().await.unwrap();
        assert_eq!(manager.open_sessions(), 2);
        assert_ne!(a.id(), b.id());

        a.close();
        assert_eq!(manager.open_sessions(), 1);
        drop(b);
        assert_eq!(manager.open_sessions(), 0);
    }

    #[tokio::test]
    async fn session_runs_queries() {
        let manager = SessionManager::new(pool(1).await);
        let session = manager.open().await.unwrap();

        let mut conn = session.connection().await;
        let (one,): (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn closed_session_frees_its_connection() {
        let manager = SessionManager::new(pool(1).await);

        let first = manager.open().await.unwrap();
        // Pool of one is exhausted while the first session lives
        assert!(manager.open().await.is_err());
        first.close();

        let second = manager.open().await.unwrap();
        assert_eq!(second.id(), 2);
    }
}
