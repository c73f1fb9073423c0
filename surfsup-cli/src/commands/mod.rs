//! Command implementations for surfsup CLI

pub mod inspect;
pub mod serve;

pub use inspect::run_inspect;
pub use serve::run_serve;
