// src/database.rs
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

/// Width of every string column (`VARCHAR(255)`).
pub const STRING_COLUMN_LIMIT: usize = 255;

pub async fn create_pool(options: PgConnectOptions, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

/// Declares the `"Users"` table. Safe to run on every startup.
pub async fn sync_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS "Users" (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255),
            dob TIMESTAMPTZ,
            address VARCHAR(255),
            description VARCHAR(255),
            "createdAt" TIMESTAMPTZ NOT NULL DEFAULT now()
        )"#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
