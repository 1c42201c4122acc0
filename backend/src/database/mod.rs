//! Module for database connection setup and common utilities.
//!
//! This module is responsible for initializing the database connection pool,
//! running migrations, and providing a central point for database-related
//! configurations and helpers.

pub mod models;
pub mod queries;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connects to the database and applies pending migrations.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
