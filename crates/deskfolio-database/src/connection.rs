//! SQLite connection pool management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use deskfolio_core::config::DatabaseConfig;
use deskfolio_core::error::{AppError, ErrorKind};

/// Create a new connection pool from configuration.
///
/// The database file is created on first use; foreign keys are enabled on
/// every connection.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, AppError> {
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Opening SQLite database"
    );

    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Invalid database URL '{}': {e}", config.url),
                e,
            )
        })?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect_with(options)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to open database: {e}"),
                e,
            )
        })?;

    info!("Database pool ready");
    Ok(pool)
}

/// Check database connectivity.
pub async fn health_check(pool: &SqlitePool) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|v| v == 1)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
}
