//! Route handlers organized by resource

pub mod home;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;
