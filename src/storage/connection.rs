//! Database connection management

use sqlx::{Pool, Postgres};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::utils::errors::MeetupSyncError;

pub type DatabasePool = Pool<Postgres>;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, MeetupSyncError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect(&config.url)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), MeetupSyncError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await?;

    Ok(())
}
