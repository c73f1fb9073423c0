//! Database connection pool management
//!
//! Uses sqlx SqlitePool over a single read-only file.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open a read-only SQLite connection pool.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be opened. The
/// file is never created.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("Resources/hawaii.sqlite").await?;
/// ```
pub async fn create_pool(path: impl AsRef<Path>) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(path, DEFAULT_MAX_CONNECTIONS).await
}

/// Open a read-only SQLite connection pool with custom options.
pub async fn create_pool_with_options(
    path: impl AsRef<Path>,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path.as_ref())
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::debug!(
        path = %path.as_ref().display(),
        max_connections,
        "Opened database pool"
    );
    Ok(pool)
}
