//! Handlers for photos. Every route requires authentication; update and
//! delete are restricted to the photo's owner.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mygram_core::types::DbId;
use mygram_db::models::photo::{CreatePhoto, UpdatePhoto};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::MessageResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /photos
pub async fn create_photo(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePhoto>,
) -> AppResult<impl IntoResponse> {
    let photo = state.photos.create(user.user_id, input).await?;

    tracing::info!(photo_id = photo.id, user_id = user.user_id, "Photo created");

    Ok(Json(photo))
}

/// GET /photos
pub async fn list_photos(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.photos.list().await?))
}

/// PUT /photos/{id}
pub async fn update_photo(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(photo_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdatePhoto>,
) -> AppResult<impl IntoResponse> {
    let photo = state.photos.update(user.user_id, photo_id, input).await?;

    tracing::info!(photo_id, user_id = user.user_id, "Photo updated");

    Ok(Json(photo))
}

/// DELETE /photos/{id}
pub async fn delete_photo(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(photo_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.photos.delete(user.user_id, photo_id).await?;

    tracing::info!(photo_id, user_id = user.user_id, "Photo deleted");

    Ok(Json(MessageResponse {
        message: "Your photo has been successfully deleted".into(),
    }))
}
