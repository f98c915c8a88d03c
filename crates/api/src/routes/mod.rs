pub mod comments;
pub mod health;
pub mod photos;
pub mod public;
pub mod social_medias;
pub mod users;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::middleware::auth::authenticate;
use crate::state::AppState;

/// Build the API route tree (everything except `/health`).
///
/// Route hierarchy:
///
/// ```text
/// /public                      issue public token
///
/// /users/sign-up               sign up (public)
/// /users/login                 login (public)
/// /users                       list (requires auth)
/// /users/{id}                  get, update, soft delete (requires auth)
///
/// /photos                      list, create (requires auth)
/// /photos/{id}                 update, delete (owner only)
///
/// /comments                    list, create (requires auth)
/// /comments/{id}               update, delete (owner only)
///
/// /socialmedias                list, create (requires auth)
/// /socialmedias/{id}           update, delete (owner only)
/// ```
///
/// The authentication middleware is a route layer on the protected group,
/// so unknown paths still fall through to 404.
pub fn api_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/users", users::router())
        .nest("/photos", photos::router())
        .nest("/comments", comments::router())
        .nest("/socialmedias", social_medias::router())
        .route_layer(from_fn_with_state(state, authenticate));

    Router::new()
        .merge(public::router())
        .merge(users::public_router())
        .merge(protected)
}
