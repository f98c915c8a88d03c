use axum::routing::{get, put};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Comment routes nested at `/comments`.
///
/// ```text
/// GET    /      -> list_comments
/// POST   /      -> create_comment
/// PUT    /{id}  -> update_comment
/// DELETE /{id}  -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
}
