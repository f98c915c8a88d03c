//! Handlers for user accounts: sign-up, login and profile management.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mygram_core::types::DbId;
use mygram_db::models::user::{SignInRequest, SignUpRequest, UpdateUser, UserResponse};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// POST /users/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignUpRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.sign_up(input).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User signed up");

    Ok(Json(user))
}

/// POST /users/login
///
/// Accepts `identifier` (or `username` / `email`) plus `password`.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignInRequest>,
) -> AppResult<impl IntoResponse> {
    let (user, token) = state.users.sign_in(input).await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse { token, user }))
}

/// GET /users
pub async fn list_users(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.users.list().await?))
}

/// GET /users/{id}
pub async fn get_user(
    _user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.users.get_by_id(id).await?))
}

/// PUT /users/{id}
///
/// Only the account holder may update their profile.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.update_by_id(auth.user_id, id, input).await?;

    tracing::info!(user_id = id, "User updated");

    Ok(Json(user))
}

/// DELETE /users/{id}
///
/// Soft delete of the caller's own account. Returns the record as it was
/// before deletion.
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.delete_by_id(auth.user_id, id).await?;

    tracing::info!(user_id = id, "User deleted");

    Ok(Json(user))
}
