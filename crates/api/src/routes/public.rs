use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// ```text
/// GET /public -> issue_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/public", get(public::issue_token))
}
