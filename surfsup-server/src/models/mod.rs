//! Domain models shared by the database and HTTP layers

pub mod dates;
pub mod temperature;

pub use dates::{trailing_year_cutoff, DATE_FORMAT, TRAILING_WINDOW_DAYS};
pub use temperature::TemperatureStats;
