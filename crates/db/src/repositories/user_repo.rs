//! Repository for the `users` table.

use async_trait::async_trait;
use mygram_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};
use crate::store::{StoreError, StoreResult, UserStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, dob, deleted_at, created_at, updated_at";

/// Provides CRUD operations for users. Soft-deleted rows are invisible to
/// every query here.
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn create(&self, input: &CreateUser) -> StoreResult<User> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, dob)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.date_of_birth)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_identifier(&self, identifier: &str) -> StoreResult<Option<User>> {
        // Prefer an exact username match over an email match.
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE (username = $1 OR email = $1) AND deleted_at IS NULL
             ORDER BY (username = $1) DESC, id
             LIMIT 1"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id");
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn update(&self, user: &User) -> StoreResult<Option<User>> {
        let query = format!(
            "UPDATE users SET
                username = $2,
                email = $3,
                dob = $4,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(user.date_of_birth)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn soft_delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
