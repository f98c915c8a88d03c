//! PostgreSQL implementations of the store traits.
//!
//! Each repository wraps a cloned `PgPool` so it can be handed to the
//! service layer as an `Arc<dyn …Store>`.

pub mod comment_repo;
pub mod photo_repo;
pub mod social_media_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use photo_repo::PhotoRepo;
pub use social_media_repo::SocialMediaRepo;
pub use user_repo::UserRepo;
