use axum::routing::{get, put};
use axum::Router;

use crate::handlers::social_medias;
use crate::state::AppState;

/// Social media routes nested at `/socialmedias`.
///
/// ```text
/// GET    /      -> list_social_medias
/// POST   /      -> create_social_media
/// PUT    /{id}  -> update_social_media
/// DELETE /{id}  -> delete_social_media
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(social_medias::list_social_medias).post(social_medias::create_social_media),
        )
        .route(
            "/{id}",
            put(social_medias::update_social_media).delete(social_medias::delete_social_media),
        )
}
