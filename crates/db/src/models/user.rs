//! User entity model and DTOs.

use mygram_core::ownership::Owned;
use mygram_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(rename = "dob")]
    pub date_of_birth: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An account owns itself: only the account holder may change or delete it.
impl Owned for User {
    const ENTITY: &'static str = "User";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.id
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub date_of_birth: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            date_of_birth: user.date_of_birth,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Public identity of a record's owner, embedded in list projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub id: DbId,
    pub email: String,
    pub username: String,
}

/// DTO for inserting a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub date_of_birth: Option<Timestamp>,
}

/// Request body for `POST /users/sign-up`.
///
/// Missing strings default to empty and `date_of_birth` stays a raw string,
/// so the sign-up rules, not the JSON extractor, report what is wrong.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "dob", alias = "dateOfBirth")]
    pub date_of_birth: Option<String>,
}

/// Request body for `POST /users/login`. The identifier matches either the
/// username or the email address.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    #[serde(alias = "username", alias = "email")]
    pub identifier: String,
    pub password: String,
}

/// DTO for updating a user profile. How each field is merged depends on the
/// configured merge policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "dob", alias = "dateOfBirth")]
    pub date_of_birth: Option<Timestamp>,
}
