//! Persistence traits consumed by the service layer.
//!
//! Services hold `Arc<dyn …Store>` handles injected at construction time.
//! [`crate::repositories`] implements every trait against PostgreSQL;
//! [`crate::memory::MemoryStore`] implements them in process for tests.

use async_trait::async_trait;
use mygram_core::types::DbId;

use crate::models::comment::{Comment, CommentWithRelations, CreateComment};
use crate::models::photo::{CreatePhoto, Photo, PhotoWithOwner};
use crate::models::social_media::{CreateSocialMedia, SocialMedia, SocialMediaWithOwner};
use crate::models::user::{CreateUser, User};

/// Errors surfaced by any store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert or update collided with a unique constraint (named `uq_*`).
    #[error("Duplicate value violates unique constraint: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Failure inside a non-SQL backend (e.g. a poisoned lock in the
    /// in-memory store).
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Reclassify a sqlx error, pulling out unique-constraint violations.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return StoreError::UniqueViolation(constraint.to_string());
                }
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, input: &CreateUser) -> StoreResult<User>;

    /// Excludes soft-deleted users.
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<User>>;

    /// Match on username or email. Excludes soft-deleted users.
    async fn find_by_identifier(&self, identifier: &str) -> StoreResult<Option<User>>;

    /// All non-deleted users.
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Persist `username`, `email` and `date_of_birth` from `user`.
    ///
    /// Returns `None` if no live row with `user.id` exists.
    async fn update(&self, user: &User) -> StoreResult<Option<User>>;

    /// Set the `deleted_at` tombstone. Returns `true` if a live row was marked.
    async fn soft_delete(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn create(&self, user_id: DbId, input: &CreatePhoto) -> StoreResult<Photo>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Photo>>;

    async fn list_with_owner(&self) -> StoreResult<Vec<PhotoWithOwner>>;

    /// Persist `title`, `caption` and `url` from `photo`. The owner is never
    /// changed.
    async fn update(&self, photo: &Photo) -> StoreResult<Option<Photo>>;

    /// Hard delete. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(&self, user_id: DbId, input: &CreateComment) -> StoreResult<Comment>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Comment>>;

    async fn list_with_relations(&self) -> StoreResult<Vec<CommentWithRelations>>;

    /// Persist `message` from `comment`.
    async fn update(&self, comment: &Comment) -> StoreResult<Option<Comment>>;

    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait SocialMediaStore: Send + Sync {
    async fn create(&self, user_id: DbId, input: &CreateSocialMedia) -> StoreResult<SocialMedia>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<SocialMedia>>;

    async fn list_with_owner(&self) -> StoreResult<Vec<SocialMediaWithOwner>>;

    /// Persist `name` and `url` from `social_media`.
    async fn update(&self, social_media: &SocialMedia) -> StoreResult<Option<SocialMedia>>;

    async fn delete(&self, id: DbId) -> StoreResult<bool>;
}
