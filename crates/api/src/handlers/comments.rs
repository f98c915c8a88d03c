//! Handlers for comments on photos.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mygram_core::types::DbId;
use mygram_db::models::comment::{CreateComment, UpdateComment};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::MessageResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /comments
pub async fn create_comment(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateComment>,
) -> AppResult<impl IntoResponse> {
    let comment = state.comments.create(user.user_id, input).await?;

    tracing::info!(
        comment_id = comment.id,
        photo_id = comment.photo_id,
        user_id = user.user_id,
        "Comment created",
    );

    Ok(Json(comment))
}

/// GET /comments
pub async fn list_comments(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.comments.list().await?))
}

/// PUT /comments/{id}
pub async fn update_comment(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(comment_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateComment>,
) -> AppResult<impl IntoResponse> {
    let comment = state.comments.update(user.user_id, comment_id, input).await?;

    tracing::info!(comment_id, user_id = user.user_id, "Comment updated");

    Ok(Json(comment))
}

/// DELETE /comments/{id}
pub async fn delete_comment(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(comment_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.comments.delete(user.user_id, comment_id).await?;

    tracing::info!(comment_id, user_id = user.user_id, "Comment deleted");

    Ok(Json(MessageResponse {
        message: "Your comment has been successfully deleted".into(),
    }))
}
