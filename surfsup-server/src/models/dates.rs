//! Observation dates
//!
//! Dates are stored as `YYYY-MM-DD` text and compared lexicographically in
//! SQL. Only the trailing-year cutoff needs real date arithmetic.

use chrono::{Duration, NaiveDate};

/// Storage format of the `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window ending at the latest observation.
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// Exclusive lower bound of the trailing window ending at `latest`.
///
/// An observation dated exactly [`TRAILING_WINDOW_DAYS`] before `latest` is
/// outside the window; the day after it is the first one inside.
pub fn trailing_year_cutoff(latest: &str) -> Result<String, chrono::ParseError> {
    let latest = NaiveDate::parse_from_str(latest, DATE_FORMAT)?;
    let cutoff = latest - Duration::days(TRAILING_WINDOW_DAYS);
    Ok(cutoff.format(DATE_FORMAT).to_string())
}
