//! Database layer - pool, schema reflection, sessions and repositories
//!
//! # Design Principles
//!
//! - The database is read-only; the pool opens the file with `mode=ro`
//! - Schema is checked once at startup, SQL is built once from it
//! - One session per request, released when the request ends

pub mod pool;
pub mod queries;
pub mod repos;
pub mod schema;
pub mod session;

pub use pool::create_pool;
pub use queries::Queries;
pub use repos::*;
pub use schema::{Entity, Schema, SchemaError};
pub use session::{Session, SessionManager};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("invalid date '{value}' in {column}")]
    InvalidDate { column: &'static str, value: String },
}
