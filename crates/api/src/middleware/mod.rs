//! Authentication middleware and the principal extractor.
//!
//! - [`auth::authenticate`] -- Validates the bearer token and stores an
//!   [`auth::AuthUser`] in request extensions.
//! - [`auth::AuthUser`] -- Reads the principal back out in handlers.

pub mod auth;
