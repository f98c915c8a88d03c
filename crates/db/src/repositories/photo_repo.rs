//! Repository for the `photos` table.

use async_trait::async_trait;
use mygram_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::models::photo::{CreatePhoto, Photo, PhotoWithOwner};
use crate::models::user::OwnerSummary;
use crate::store::{PhotoStore, StoreResult};

const COLUMNS: &str = "id, title, caption, url, user_id, created_at, updated_at";

/// A photo row LEFT JOINed with its live owner.
#[derive(Debug, FromRow)]
struct PhotoOwnerRow {
    id: DbId,
    title: String,
    caption: String,
    url: String,
    user_id: DbId,
    created_at: Timestamp,
    updated_at: Timestamp,
    owner_id: Option<DbId>,
    owner_email: Option<String>,
    owner_username: Option<String>,
}

impl From<PhotoOwnerRow> for PhotoWithOwner {
    fn from(row: PhotoOwnerRow) -> Self {
        let owner = match (row.owner_id, row.owner_email, row.owner_username) {
            (Some(id), Some(email), Some(username)) => Some(OwnerSummary {
                id,
                email,
                username,
            }),
            _ => None,
        };
        Self {
            photo: Photo {
                id: row.id,
                title: row.title,
                caption: row.caption,
                url: row.url,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            owner,
        }
    }
}

/// Provides CRUD operations for photos.
pub struct PhotoRepo {
    pool: PgPool,
}

impl PhotoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoStore for PhotoRepo {
    async fn create(&self, user_id: DbId, input: &CreatePhoto) -> StoreResult<Photo> {
        let query = format!(
            "INSERT INTO photos (title, caption, url, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let photo = sqlx::query_as::<_, Photo>(&query)
            .bind(&input.title)
            .bind(&input.caption)
            .bind(&input.url)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(photo)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Photo>> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        let photo = sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(photo)
    }

    async fn list_with_owner(&self) -> StoreResult<Vec<PhotoWithOwner>> {
        let rows = sqlx::query_as::<_, PhotoOwnerRow>(
            "SELECT p.id, p.title, p.caption, p.url, p.user_id, p.created_at, p.updated_at,
                    u.id AS owner_id, u.email AS owner_email, u.username AS owner_username
             FROM photos p
             LEFT JOIN users u ON u.id = p.user_id AND u.deleted_at IS NULL
             ORDER BY p.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(PhotoWithOwner::from).collect())
    }

    async fn update(&self, photo: &Photo) -> StoreResult<Option<Photo>> {
        let query = format!(
            "UPDATE photos SET
                title = $2,
                caption = $3,
                url = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let photo = sqlx::query_as::<_, Photo>(&query)
            .bind(photo.id)
            .bind(&photo.title)
            .bind(&photo.caption)
            .bind(&photo.url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(photo)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
