use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::jwt::issue_public_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// GET /public
///
/// Issue a token with no user binding. Useful for checking that signing works.
pub async fn issue_token(State(state): State<AppState>) -> AppResult<Json<TokenResponse>> {
    let token = issue_public_token(&state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing failed: {e}")))?;
    Ok(Json(TokenResponse { token }))
}
