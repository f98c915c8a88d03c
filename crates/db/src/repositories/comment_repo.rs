//! Repository for the `comments` table.
//!
//! Listings join each comment with its author (public identity only) and the
//! photo it was left on.

use async_trait::async_trait;
use mygram_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::models::comment::{Comment, CommentWithRelations, CreateComment};
use crate::models::photo::PhotoSummary;
use crate::models::user::OwnerSummary;
use crate::store::{CommentStore, StoreResult};

const COLUMNS: &str = "id, message, photo_id, user_id, created_at, updated_at";

#[derive(Debug, FromRow)]
struct CommentRelationsRow {
    id: DbId,
    message: String,
    photo_id: DbId,
    user_id: DbId,
    created_at: Timestamp,
    updated_at: Timestamp,
    owner_id: Option<DbId>,
    owner_email: Option<String>,
    owner_username: Option<String>,
    p_id: Option<DbId>,
    p_title: Option<String>,
    p_caption: Option<String>,
    p_url: Option<String>,
    p_user_id: Option<DbId>,
}

impl From<CommentRelationsRow> for CommentWithRelations {
    fn from(row: CommentRelationsRow) -> Self {
        let owner = match (row.owner_id, row.owner_email, row.owner_username) {
            (Some(id), Some(email), Some(username)) => Some(OwnerSummary {
                id,
                email,
                username,
            }),
            _ => None,
        };
        let photo = match (row.p_id, row.p_title, row.p_caption, row.p_url, row.p_user_id) {
            (Some(id), Some(title), Some(caption), Some(url), Some(user_id)) => {
                Some(PhotoSummary {
                    id,
                    title,
                    caption,
                    url,
                    user_id,
                })
            }
            _ => None,
        };
        Self {
            comment: Comment {
                id: row.id,
                message: row.message,
                photo_id: row.photo_id,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            owner,
            photo,
        }
    }
}

/// Provides CRUD operations for comments.
pub struct CommentRepo {
    pool: PgPool,
}

impl CommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepo {
    async fn create(&self, user_id: DbId, input: &CreateComment) -> StoreResult<Comment> {
        let query = format!(
            "INSERT INTO comments (message, photo_id, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(&input.message)
            .bind(input.photo_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Comment>> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn list_with_relations(&self) -> StoreResult<Vec<CommentWithRelations>> {
        let rows = sqlx::query_as::<_, CommentRelationsRow>(
            "SELECT c.id, c.message, c.photo_id, c.user_id, c.created_at, c.updated_at,
                    u.id AS owner_id, u.email AS owner_email, u.username AS owner_username,
                    p.id AS p_id, p.title AS p_title, p.caption AS p_caption,
                    p.url AS p_url, p.user_id AS p_user_id
             FROM comments c
             LEFT JOIN users u ON u.id = c.user_id AND u.deleted_at IS NULL
             LEFT JOIN photos p ON p.id = c.photo_id
             ORDER BY c.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CommentWithRelations::from).collect())
    }

    async fn update(&self, comment: &Comment) -> StoreResult<Option<Comment>> {
        let query = format!(
            "UPDATE comments SET
                message = $2,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Comment>(&query)
            .bind(comment.id)
            .bind(&comment.message)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
