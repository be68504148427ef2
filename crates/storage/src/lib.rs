//! Storage Layer
//!
//! Read-only access to the climate dataset: the `station` and `measurement`
//! tables of a pre-existing SQLite database. Record types are declared
//! statically and every query is plain parameterized SQL.

mod repository;
mod window;

pub use repository::{
    PrecipitationReading, Repository, Station, TemperatureReading, TemperatureStats,
};
pub use window::trailing_year_cutoff;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Invalid date in dataset: {0}")]
    InvalidDate(String),
}
