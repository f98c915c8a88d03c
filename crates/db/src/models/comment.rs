//! Comment entity model and DTOs.

use mygram_core::ownership::Owned;
use mygram_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::photo::PhotoSummary;
use super::user::OwnerSummary;

/// A row from the `comments` table. `user_id` is the commenting user.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub message: String,
    pub photo_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Comment {
    const ENTITY: &'static str = "Comment";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

/// A comment joined with its author and the photo it references.
#[derive(Debug, Clone)]
pub struct CommentWithRelations {
    pub comment: Comment,
    pub owner: Option<OwnerSummary>,
    pub photo: Option<PhotoSummary>,
}

/// List projection for `GET /comments`.
#[derive(Debug, Clone, Serialize)]
pub struct CommentListItem {
    pub id: DbId,
    pub message: String,
    pub photo_id: DbId,
    pub user_id: DbId,
    pub user: Option<OwnerSummary>,
    pub photo: Option<PhotoSummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CommentWithRelations> for CommentListItem {
    fn from(row: CommentWithRelations) -> Self {
        let CommentWithRelations {
            comment,
            owner,
            photo,
        } = row;
        Self {
            id: comment.id,
            message: comment.message,
            photo_id: comment.photo_id,
            user_id: comment.user_id,
            user: owner,
            photo,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Response for `PUT /comments/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct CommentUpdateResponse {
    pub id: DbId,
    pub message: String,
    pub photo_id: DbId,
    pub user_id: DbId,
    pub updated_at: Timestamp,
}

impl From<Comment> for CommentUpdateResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
            photo_id: comment.photo_id,
            user_id: comment.user_id,
            updated_at: comment.updated_at,
        }
    }
}

/// DTO for creating a comment on an existing photo.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    #[serde(default)]
    #[validate(length(min = 1, message = "invalid message cause is required"))]
    pub message: String,
    #[serde(default, alias = "photoId")]
    #[validate(range(min = 1, message = "invalid photo id cause is required"))]
    pub photo_id: DbId,
}

/// DTO for updating a comment. Only the message can change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComment {
    pub message: Option<String>,
}
