pub mod users;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::docs;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new().merge(users::routes())
}

/// Full application: user routes, health check, API docs and request tracing.
pub fn create_app(state: AppState) -> Router {
    create_router()
        .route("/health", get(health_check))
        .merge(docs::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
