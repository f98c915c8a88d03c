//! Photo entity model and DTOs.

use mygram_core::ownership::Owned;
use mygram_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::user::OwnerSummary;

/// A row from the `photos` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub title: String,
    pub caption: String,
    pub url: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Photo {
    const ENTITY: &'static str = "Photo";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

/// A photo joined with its owner. The owner is `None` when the owning user
/// has been soft-deleted.
#[derive(Debug, Clone)]
pub struct PhotoWithOwner {
    pub photo: Photo,
    pub owner: Option<OwnerSummary>,
}

/// Public projection of a photo, as embedded in comment listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoSummary {
    pub id: DbId,
    pub title: String,
    pub caption: String,
    pub url: String,
    pub user_id: DbId,
}

impl From<&Photo> for PhotoSummary {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title.clone(),
            caption: photo.caption.clone(),
            url: photo.url.clone(),
            user_id: photo.user_id,
        }
    }
}

/// List projection: the photo plus its owner's public identity.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoListItem {
    pub id: DbId,
    pub title: String,
    pub caption: String,
    pub url: String,
    pub user_id: DbId,
    pub user: Option<OwnerSummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PhotoWithOwner> for PhotoListItem {
    fn from(row: PhotoWithOwner) -> Self {
        let PhotoWithOwner { photo, owner } = row;
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            url: photo.url,
            user_id: photo.user_id,
            user: owner,
            created_at: photo.created_at,
            updated_at: photo.updated_at,
        }
    }
}

/// Response for `PUT /photos/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoUpdateResponse {
    pub id: DbId,
    pub title: String,
    pub caption: String,
    pub url: String,
    pub user_id: DbId,
    pub updated_at: Timestamp,
}

impl From<Photo> for PhotoUpdateResponse {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            url: photo.url,
            user_id: photo.user_id,
            updated_at: photo.updated_at,
        }
    }
}

/// DTO for creating a photo. The owner is the authenticated user, never a
/// field of the request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePhoto {
    #[serde(default)]
    #[validate(length(min = 1, message = "invalid title cause is required"))]
    pub title: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "invalid photo url cause is required"),
        url(message = "invalid photo url")
    )]
    pub url: String,
}

/// DTO for updating a photo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePhoto {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub url: Option<String>,
}
