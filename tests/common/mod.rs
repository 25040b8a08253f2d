/// Common test utilities and fixtures
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, response::Response, Router};
use http::{header, Method, Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;
use users_api::{
    models::user::{NewUser, User, UserChanges},
    AppState, MemoryUserStore, StoreError, UserStore,
};

/// Router backed by a fresh in-memory store
pub fn memory_app() -> Router {
    app_with(Arc::new(MemoryUserStore::new()))
}

pub fn app_with(store: Arc<dyn UserStore>) -> Router {
    users_api::create_app(AppState::new(store))
}

/// Sends one request and returns status plus raw body bytes.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    match body {
        Some(json) => {
            let raw = serde_json::to_string(&json).unwrap();
            send_raw(app, method, uri, Some("application/json"), &raw).await
        }
        None => send_raw(app, method, uri, None, "").await,
    }
}

/// Sends a body verbatim with an optional `Content-Type`.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Vec<u8>) {
    let response = fetch(app, method, uri, content_type, body).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

pub async fn fetch(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

/// Store whose every call fails, or whose writes "succeed" without matching anything.
pub enum BrokenStore {
    Unavailable,
    EmptyInsert,
}

#[async_trait]
impl UserStore for BrokenStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find(&self, _id: i32) -> Result<Option<User>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn create(&self, _user: NewUser) -> Result<Option<User>, StoreError> {
        match self {
            BrokenStore::Unavailable => Err(sqlx::Error::PoolTimedOut.into()),
            BrokenStore::EmptyInsert => Ok(None),
        }
    }

    async fn update(&self, _id: i32, _changes: UserChanges) -> Result<bool, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _id: i32) -> Result<bool, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
