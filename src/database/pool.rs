use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

fn database_url() -> Result<String, PoolError> {
    std::env::var("DATABASE_URL").map_err(|_| PoolError::ConfigMissing("DATABASE_URL"))
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
}

/// Connect eagerly at startup so misconfiguration fails fast
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, PoolError> {
    let url = database_url()?;
    let pool = pool_options(config).connect(&url).await?;
    info!("Connected database pool (max_connections={})", config.max_connections);
    Ok(pool)
}

/// Lazy pool that defers the first connection until a query runs.
/// Used by tests that exercise the router without a live database.
pub fn connect_lazy(config: &DatabaseConfig, url: &str) -> Result<PgPool, PoolError> {
    Ok(pool_options(config).connect_lazy(url)?)
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &PgPool) -> Result<(), PoolError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
