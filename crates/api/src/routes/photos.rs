use axum::routing::{get, put};
use axum::Router;

use crate::handlers::photos;
use crate::state::AppState;

/// Photo routes nested at `/photos`.
///
/// ```text
/// GET    /      -> list_photos
/// POST   /      -> create_photo
/// PUT    /{id}  -> update_photo
/// DELETE /{id}  -> delete_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(photos::list_photos).post(photos::create_photo))
        .route(
            "/{id}",
            put(photos::update_photo).delete(photos::delete_photo),
        )
}
