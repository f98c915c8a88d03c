//! Domain services, one per resource.
//!
//! Each service is constructed with the store(s) it needs and the merge
//! policy for its updatable fields. Owned resources run every mutation
//! through [`mygram_core::ownership::ensure_owner`].

pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

pub use comment::CommentService;
pub use photo::PhotoService;
pub use social_media::SocialMediaService;
pub use user::UserService;
