//! Repository implementations for database access
//!
//! Each repository borrows a request's [`Session`](crate::db::Session) and
//! the prepared [`Queries`](crate::db::Queries). All reads are single
//! statements; there are no transactions and no writes.

pub mod measurements;
pub mod stations;

pub use measurements::{DatedValue, MeasurementRepo};
pub use stations::{Station, StationRepo};
