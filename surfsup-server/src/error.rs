//! Error types for surfsup-server

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::{DbError, SchemaError};

pub type Result<T> = std::result::Result<T, Error>;

/// Startup and serving failures.
///
/// Per-request failures are handled by [`crate::http::ApiError`]; everything
/// here is fatal to the process.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(DbError::from(e))
    }
}
