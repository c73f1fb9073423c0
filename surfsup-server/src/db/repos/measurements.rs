//! Measurement repository
//!
//! Every query runs on the request's session; nothing here holds a
//! connection beyond a single statement.

use crate::db::{DbError, Queries, Session};
use crate::models::{trailing_year_cutoff, TemperatureStats};

/// `(date, value)` pair for one observation
pub type DatedValue = (String, Option<f64>);

/// Measurement repository
pub struct MeasurementRepo<'a> {
    session: &'a Session,
    queries: &'a Queries,
}

impl<'a> MeasurementRepo<'a> {
    pub fn new(session: &'a Session, queries: &'a Queries) -> Self {
        Self { session, queries }
    }

    /// Latest observation date, `None` when the table is empty.
    pub async fn max_date(&self) -> Result<Option<String>, DbError> {
        let mut conn = self.session.connection().await;
        let date = sqlx::query_scalar::<_, Option<String>>(&self.queries.max_date)
            .fetch_one(&mut **conn)
            .await?;
        Ok(date)
    }

    /// Earliest and latest observation dates.
    pub async fn date_range(&self) -> Result<(Option<String>, Option<String>), DbError> {
        let mut conn = self.session.connection().await;
        let min = sqlx::query_scalar::<_, Option<String>>(&self.queries.min_date)
            .fetch_one(&mut **conn)
            .await?;
        let max = sqlx::query_scalar::<_, Option<String>>(&self.queries.max_date)
            .fetch_one(&mut **conn)
            .await?;
        Ok((min, max))
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.session.connection().await;
        let count = sqlx::query_scalar::<_, i64>(&self.queries.count_measurements)
            .fetch_one(&mut **conn)
            .await?;
        Ok(count)
    }

    /// Exclusive lower bound of the trailing year ending at the latest
    /// observation.
    ///
    /// `None` when there are no observations at all.
    pub async fn window_cutoff(&self) -> Result<Option<String>, DbError> {
        let Some(latest) = self.max_date().await? else {
            return Ok(None);
        };

        let cutoff = trailing_year_cutoff(&latest).map_err(|_| DbError::InvalidDate {
            column: "measurement.date",
            value: latest.clone(),
        })?;

        tracing::debug!(%latest, %cutoff, "Trailing year window");
        Ok(Some(cutoff))
    }

    /// `(date, prcp)` for every observation strictly after `cutoff`.
    pub async fn precipitation_after(&self, cutoff: &str) -> Result<Vec<DatedValue>, DbError> {
        let mut conn = self.session.connection().await;
        let rows = sqlx::query_as::<_, DatedValue>(&self.queries.precipitation_after)
            .bind(cutoff)
            .fetch_all(&mut **conn)
            .await?;
        Ok(rows)
    }

    /// `(date, tobs)` for one station strictly after `cutoff`.
    pub async fn tobs_after(&self, cutoff: &str, station: &str) -> Result<Vec<DatedValue>, DbError> {
        let mut conn = self.session.connection().await;
        let rows = sqlx::query_as::<_, DatedValue>(&self.queries.tobs_after_for_station)
            .bind(cutoff)
            .bind(station)
            .fetch_all(&mut **conn)
            .await?;
        Ok(rows)
    }

    /// Min / avg / max of `tobs` for `start <= date`, and `date <= end` when
    /// an end is given. Bounds are compared as strings.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, DbError> {
        let mut conn = self.session.connection().await;
        let row = match end {
            Some(end) => {
                sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(
                    &self.queries.temperature_stats_between,
                )
                .bind(start)
                .bind(end)
                .fetch_one(&mut **conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(
                    &self.queries.temperature_stats_from,
                )
                .bind(start)
                .fetch_one(&mut **conn)
                .await?
            }
        };
        Ok(TemperatureStats::from(row))
    }
}
