//! surfsup-server: read-only climate observation API
//!
//! Exposes precipitation and temperature readings from the Hawaii
//! climate database over a handful of JSON endpoints.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::ApiConfig;
pub use error::{Error, Result};
