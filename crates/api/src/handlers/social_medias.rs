//! Handlers for a user's social media links.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mygram_core::types::DbId;
use mygram_db::models::social_media::{CreateSocialMedia, UpdateSocialMedia};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::MessageResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /socialmedias
pub async fn create_social_media(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSocialMedia>,
) -> AppResult<impl IntoResponse> {
    let social_media = state.social_medias.create(user.user_id, input).await?;

    tracing::info!(
        social_media_id = social_media.id,
        user_id = user.user_id,
        name = %social_media.name,
        "Social media created",
    );

    Ok(Json(social_media))
}

/// GET /socialmedias
pub async fn list_social_medias(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.social_medias.list().await?))
}

/// PUT /socialmedias/{id}
pub async fn update_social_media(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(social_media_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSocialMedia>,
) -> AppResult<impl IntoResponse> {
    let social_media = state
        .social_medias
        .update(user.user_id, social_media_id, input)
        .await?;

    tracing::info!(social_media_id, user_id = user.user_id, "Social media updated");

    Ok(Json(social_media))
}

/// DELETE /socialmedias/{id}
pub async fn delete_social_media(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(social_media_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state
        .social_medias
        .delete(user.user_id, social_media_id)
        .await?;

    tracing::info!(social_media_id, user_id = user.user_id, "Social media deleted");

    Ok(Json(MessageResponse {
        message: "Your social media has been successfully deleted".into(),
    }))
}
