//! HTTP handlers, one module per resource.

pub mod comments;
pub mod photos;
pub mod public;
pub mod social_medias;
pub mod users;

use serde::Serialize;

/// Body returned by delete endpoints of owned resources.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
