use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Request body for create/update, accepted as JSON or
/// `application/x-www-form-urlencoded`. An empty body reads as `{}`.
///
/// Rejections are reported through `AppError`, so a bad body answers with the
/// same `500 {"message"}` as a failed write.
#[derive(Debug)]
pub struct Payload<T>(pub T);

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase())
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence == "application/json" || essence.ends_with("+json")
}

fn is_form(content_type: &str) -> bool {
    content_type.starts_with("application/x-www-form-urlencoded")
}

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers());

        if content_type.as_deref().is_some_and(is_form) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::rejected(rejection.body_text()))?;
            return Ok(Payload(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::rejected(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_slice(b"{}")
                .map(Payload)
                .map_err(|e| AppError::rejected(e.to_string()));
        }

        match content_type.as_deref() {
            Some(ct) if is_json(ct) => {
                let Json(value) = Json::<T>::from_bytes(&bytes)
                    .map_err(|rejection| AppError::rejected(rejection.body_text()))?;
                Ok(Payload(value))
            }
            _ => Err(AppError::rejected(
                "Expected request with `Content-Type: application/json`",
            )),
        }
    }
}
