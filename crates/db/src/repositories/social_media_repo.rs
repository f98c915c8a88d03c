//! Repository for the `social_medias` table.

use async_trait::async_trait;
use mygram_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::models::social_media::{CreateSocialMedia, SocialMedia, SocialMediaWithOwner};
use crate::models::user::OwnerSummary;
use crate::store::{SocialMediaStore, StoreResult};

const COLUMNS: &str = "id, name, url, user_id, created_at, updated_at";

#[derive(Debug, FromRow)]
struct SocialMediaOwnerRow {
    id: DbId,
    name: String,
    url: String,
    user_id: DbId,
    created_at: Timestamp,
    updated_at: Timestamp,
    owner_id: Option<DbId>,
    owner_email: Option<String>,
    owner_username: Option<String>,
}

impl From<SocialMediaOwnerRow> for SocialMediaWithOwner {
    fn from(row: SocialMediaOwnerRow) -> Self {
        let owner = match (row.owner_id, row.owner_email, row.owner_username) {
            (Some(id), Some(email), Some(username)) => Some(OwnerSummary {
                id,
                email,
                username,
            }),
            _ => None,
        };
        Self {
            social_media: SocialMedia {
                id: row.id,
                name: row.name,
                url: row.url,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            owner,
        }
    }
}

/// Provides CRUD operations for social media links.
pub struct SocialMediaRepo {
    pool: PgPool,
}

impl SocialMediaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialMediaStore for SocialMediaRepo {
    async fn create(&self, user_id: DbId, input: &CreateSocialMedia) -> StoreResult<SocialMedia> {
        let query = format!(
            "INSERT INTO social_medias (name, url, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let social_media = sqlx::query_as::<_, SocialMedia>(&query)
            .bind(&input.name)
            .bind(&input.url)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(social_media)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<SocialMedia>> {
        let query = format!("SELECT {COLUMNS} FROM social_medias WHERE id = $1");
        let social_media = sqlx::query_as::<_, SocialMedia>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(social_media)
    }

    async fn list_with_owner(&self) -> StoreResult<Vec<SocialMediaWithOwner>> {
        let rows = sqlx::query_as::<_, SocialMediaOwnerRow>(
            "SELECT s.id, s.name, s.url, s.user_id, s.created_at, s.updated_at,
                    u.id AS owner_id, u.email AS owner_email, u.username AS owner_username
             FROM social_medias s
             LEFT JOIN users u ON u.id = s.user_id AND u.deleted_at IS NULL
             ORDER BY s.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SocialMediaWithOwner::from).collect())
    }

    async fn update(&self, social_media: &SocialMedia) -> StoreResult<Option<SocialMedia>> {
        let query = format!(
            "UPDATE social_medias SET
                name = $2,
                url = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SocialMedia>(&query)
            .bind(social_media.id)
            .bind(&social_media.name)
            .bind(&social_media.url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM social_medias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
