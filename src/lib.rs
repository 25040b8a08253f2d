//! Users API
//!
//! CRUD over a single `User` record, backed by PostgreSQL (or an in-process
//! store), with generated OpenAPI docs.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod database;
pub mod docs;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use routes::create_app;
pub use state::AppState;
pub use store::{MemoryUserStore, PgUserStore, StoreError, UserStore};
