//! Database migration command.
//!
//! Connects using the same configuration the server reads
//! (`CLIENTELE_DATABASE_URL`, falling back to `DATABASE_URL`) and applies the
//! embedded migrations from `crates/server/migrations/`.

use tracing::info;

use clientele_server::config::{ConfigError, ServerConfig};
use clientele_server::db;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns [`MigrationError`] if configuration is invalid, the database
/// cannot be reached, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;

    info!(database_url = %config.database_url, "Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
