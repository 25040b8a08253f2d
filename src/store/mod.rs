//! Storage client for the `User` record.
//!
//! Handlers only ever see `Arc<dyn UserStore>`; the backend is picked once at
//! startup from `DB_DIALECT`.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, DatabaseConfig, Dialect};
use crate::database;
use crate::models::user::{NewUser, User, UserChanges};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}", database_message(.0))]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Constraint(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by the database itself carry only the server's message
/// (`value too long for type character varying(255)`), not sqlx's prefix.
fn database_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db.message().to_string(),
        other => other.to_string(),
    }
}

/// One call per request. "Matched nothing" is reported as `Ok(None)` / `Ok(false)`,
/// never as an error.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn find(&self, id: i32) -> Result<Option<User>, StoreError>;

    async fn create(&self, user: NewUser) -> Result<Option<User>, StoreError>;

    /// Returns whether a row matched `id`.
    async fn update(&self, id: i32, changes: UserChanges) -> Result<bool, StoreError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}

/// Builds the configured backend. For Postgres this connects the pool and
/// declares the table.
pub async fn open(config: &DatabaseConfig) -> Result<Arc<dyn UserStore>, StoreError> {
    match config.dialect {
        Dialect::Memory => {
            info!("Using in-memory user store");
            Ok(Arc::new(MemoryUserStore::new()))
        }
        Dialect::Postgres => {
            let options = config.connect_options()?;
            let pool = database::create_pool(options, config.max_connections).await?;
            database::sync_schema(&pool).await?;
            info!("Connected to PostgreSQL user store");
            Ok(Arc::new(PgUserStore::new(pool)))
        }
    }
}
