// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use thiserror::Error;

use crate::dtos::user::MessageResponse;
use crate::store::StoreError;

/// Every failure is reported as `500 {"message": <error text>}`.
/// The text is passed through verbatim, including database error messages.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The store completed but produced nothing to act on.
    #[error("{0}")]
    Failed(String),

    /// The request body could not be turned into a typed payload.
    #[error("{0}")]
    Rejected(String),
}

impl AppError {
    pub fn failed() -> Self {
        AppError::Failed("error".to_string())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        AppError::Rejected(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(MessageResponse {
            message: self.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(StoreError::Database(err))
    }
}
