//! Connection pool management for the search history store

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Database operation errors with contextual information
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type DbResult<T> = Result<T, DbError>;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
}

/// Build a pool that connects on first use
///
/// The server starts even when the database is down; searches are still
/// aggregated and persistence failures surface as warnings.
pub fn create_lazy_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    let pool = pool_options(config)
        .min_connections(0)
        .connect_lazy(&config.url)?;

    tracing::info!(
        max_connections = config.max_connections,
        "Lazy database connection pool created"
    );

    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

pub async fn health_check(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}
