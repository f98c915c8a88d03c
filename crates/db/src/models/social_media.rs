//! Social media link entity model and DTOs.

use mygram_core::ownership::Owned;
use mygram_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidateUrl};

use super::user::OwnerSummary;

/// A row from the `social_medias` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SocialMedia {
    pub id: DbId,
    /// Platform label, e.g. `"instagram"`.
    pub name: String,
    pub url: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for SocialMedia {
    const ENTITY: &'static str = "SocialMedia";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

#[derive(Debug, Clone)]
pub struct SocialMediaWithOwner {
    pub social_media: SocialMedia,
    pub owner: Option<OwnerSummary>,
}

/// List projection for `GET /socialmedias`.
#[derive(Debug, Clone, Serialize)]
pub struct SocialMediaListItem {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub user_id: DbId,
    pub user: Option<OwnerSummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SocialMediaWithOwner> for SocialMediaListItem {
    fn from(row: SocialMediaWithOwner) -> Self {
        let SocialMediaWithOwner {
            social_media,
            owner,
        } = row;
        Self {
            id: social_media.id,
            name: social_media.name,
            url: social_media.url,
            user_id: social_media.user_id,
            user: owner,
            created_at: social_media.created_at,
            updated_at: social_media.updated_at,
        }
    }
}

/// Response for `PUT /socialmedias/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct SocialMediaUpdateResponse {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub user_id: DbId,
    pub updated_at: Timestamp,
}

impl From<SocialMedia> for SocialMediaUpdateResponse {
    fn from(sm: SocialMedia) -> Self {
        Self {
            id: sm.id,
            name: sm.name,
            url: sm.url,
            user_id: sm.user_id,
            updated_at: sm.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSocialMedia {
    #[serde(default)]
    #[validate(length(min = 1, message = "invalid name cause is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "invalid social media url cause is required"),
        url(message = "invalid social media url")
    )]
    pub url: String,
}

/// DTO for updating a social media link. A supplied, non-empty `url` must be
/// URL-shaped.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSocialMedia {
    pub name: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub url: Option<String>,
}

fn validate_optional_url(url: &str) -> Result<(), validator::ValidationError> {
    if url.is_empty() || url.validate_url() {
        return Ok(());
    }
    let mut err = validator::ValidationError::new("url");
    err.message = Some("invalid social media url".into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_url_shaped_url() {
        let input = CreateSocialMedia {
            name: "instagram".into(),
            url: "not a url".into(),
        };
        assert!(input.validate().is_err());

        let input = CreateSocialMedia {
            name: "instagram".into(),
            url: "https://instagram.com/alice".into(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_allows_missing_or_empty_url() {
        assert!(UpdateSocialMedia::default().validate().is_ok());

        let input = UpdateSocialMedia {
            name: None,
            url: Some(String::new()),
        };
        assert!(input.validate().is_ok());

        let input = UpdateSocialMedia {
            name: None,
            url: Some("nope".into()),
        };
        assert!(input.validate().is_err());
    }
}
