//! Route definitions for user accounts.
//!
//! Two routers are provided:
//! - `public_router()` for sign-up and login, mounted at the root
//! - `router()` for authenticated account routes, nested at `/users`

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// POST /users/sign-up -> sign_up
/// POST /users/login   -> login
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/users/sign-up", post(users::sign_up))
        .route("/users/login", post(users::login))
}

/// User routes nested at `/users`.
///
/// ```text
/// GET    /      -> list_users
/// GET    /{id}  -> get_user
/// PUT    /{id}  -> update_user
/// DELETE /{id}  -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(users::list_users)).route(
        "/{id}",
        get(users::get_user)
            .put(users::update_user)
            .delete(users::delete_user),
    )
}
