//! Station repository

use serde::Serialize;
use sqlx::FromRow;

use crate::db::{DbError, Queries, Session};

/// Station record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Station repository
pub struct StationRepo<'a> {
    session: &'a Session,
    queries: &'a Queries,
}

impl<'a> StationRepo<'a> {
    pub fn new(session: &'a Session, queries: &'a Queries) -> Self {
        Self { session, queries }
    }

    /// Distinct station ids in the order they first appear in the table.
    pub async fn ids(&self) -> Result<Vec<String>, DbError> {
        let mut conn = self.session.connection().await;
        let ids = sqlx::query_scalar::<_, String>(&self.queries.station_ids)
            .fetch_all(&mut **conn)
            .await?;
        Ok(ids)
    }

    pub async fn list(&self) -> Result<Vec<Station>, DbError> {
        let mut conn = self.session.connection().await;
        let stations = sqlx::query_as::<_, Station>(&self.queries.list_stations)
            .fetch_all(&mut **conn)
            .await?;
        Ok(stations)
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.session.connection().await;
        let count = sqlx::query_scalar::<_, i64>(&self.queries.count_stations)
            .fetch_one(&mut **conn)
            .await?;
        Ok(count)
    }
}
