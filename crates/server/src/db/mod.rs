//! Database operations for the customer record store.
//!
//! # Database
//!
//! A single `SQLite` database holds the `customers` table; each row carries a
//! whole customer document. Date and timestamp columns are ISO-8601 TEXT.
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/server/migrations/` via
//! [`MIGRATOR`] and run explicitly:
//! ```bash
//! cargo run -p clientele-cli -- migrate
//! ```

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod customers;

pub use customers::CustomerRepository;

/// Embedded database migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors produced by the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The underlying query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be parsed back into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if it does not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
