// src/handlers/user.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, instrument};

use crate::dtos::user::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse};
use crate::error::AppError;
use crate::extract::Payload;
use crate::state::AppState;

/// Path ids that are not integers match no row.
fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

// GET /users - List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    summary = "Retrieve a list of users",
    responses(
        (status = 200, description = "A list of users.", body = [UserResponse]),
        (status = 500, description = "Storage failure.", body = MessageResponse),
    )
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    match state.store.list().await {
        Ok(users) => Ok(Json(users.into_iter().map(UserResponse::from).collect())),
        Err(e) => {
            error!(?e, "Failed to fetch users");
            Err(e.into())
        }
    }
}

// GET /users/:id - Get single user, empty 200 when nothing matches
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    summary = "Retrieve a user by id",
    params(("id" = i32, Path, description = "Numeric ID of the user to get")),
    responses(
        (status = 200, description = "The user, or an empty body when no user matches.", body = UserResponse),
        (status = 500, description = "Storage failure.", body = MessageResponse),
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(StatusCode::OK.into_response());
    };

    let user = state.store.find(id).await.map_err(|e| {
        error!(?e, id, "Failed to fetch user");
        AppError::from(e)
    })?;

    Ok(match user {
        Some(user) => Json(UserResponse::from(user)).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

// POST /users - Create new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    summary = "Insert a user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User inserted.", body = MessageResponse),
        (status = 500, description = "Insert failed.", body = MessageResponse),
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Payload(payload): Payload<CreateUserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let created = state.store.create(payload.into()).await.map_err(|e| {
        error!(?e, "Failed to create user");
        AppError::from(e)
    })?;

    if created.is_none() {
        error!("Insert returned no user");
        return Err(AppError::failed());
    }

    Ok((StatusCode::CREATED, Json(MessageResponse::success())))
}

// PUT /users/:id - Update user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    summary = "Edit a user by id",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "User updated."),
        (status = 500, description = "Update failed or no user matched.", body = MessageResponse),
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_user(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Payload(payload): Payload<UpdateUserRequest>,
) -> Result<StatusCode, AppError> {
    let Some(id) = parse_id(&id) else {
        return Err(AppError::failed());
    };

    let matched = state.store.update(id, payload.into()).await.map_err(|e| {
        error!(?e, id, "Failed to update user");
        AppError::from(e)
    })?;

    if !matched {
        return Err(AppError::failed());
    }

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /users/:id - Delete user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    summary = "Delete a user",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted.", body = MessageResponse),
        (status = 500, description = "Delete failed or no user matched.", body = MessageResponse),
    )
)]
#[instrument(skip(state))]
pub async fn delete_user(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let Some(id) = parse_id(&id) else {
        return Err(AppError::failed());
    };

    let removed = state.store.delete(id).await.map_err(|e| {
        error!(?e, id, "Failed to delete user");
        AppError::from(e)
    })?;

    if !removed {
        return Err(AppError::failed());
    }

    Ok(Json(MessageResponse::success()))
}
