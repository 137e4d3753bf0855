// slotbook-server/src/db/mod.rs

//! PostgreSQL lifecycle: pool, migrations, seeding, and the `BookingStore`
//! implementation on top of them.

pub mod pg_store;
pub mod seed;

pub use pg_store::PgStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::errors::{AppError, Result};

#[instrument(name = "db::connect", skip_all, fields(max_connections = config.database_max_connections))]
pub async fn connect(config: &AppConfig) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.database_max_connections)
    .acquire_timeout(Duration::from_secs(5))
    .connect(&config.database_url)
    .await?;
  info!("Successfully connected to the database.");
  Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> Result<()> {
  sqlx::migrate!("./migrations")
    .run(pool)
    .await
    .map_err(|e| AppError::Internal(format!("Database migration failed: {}", e)))?;
  info!("Database migrations applied.");
  Ok(())
}
