//! User accounts: listing, profile updates, soft delete, sign-up and sign-in.

use std::sync::Arc;

use chrono::Utc;
use mygram_core::error::CoreError;
use mygram_core::ownership::ensure_owner;
use mygram_core::types::DbId;
use mygram_core::validation::validate_sign_up;
use mygram_db::models::user::{
    CreateUser, SignInRequest, SignUpRequest, UpdateUser, User, UserResponse,
};
use mygram_db::store::UserStore;
use mygram_db::StoreError;

use crate::auth::jwt::{issue_access_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::config::UserMergePolicy;
use crate::error::{AppError, AppResult};

const ENTITY: &str = "User";

pub struct UserService {
    store: Arc<dyn UserStore>,
    jwt: JwtConfig,
    merge: UserMergePolicy,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, jwt: JwtConfig, merge: UserMergePolicy) -> Self {
        Self { store, jwt, merge }
    }

    /// All non-deleted users.
    pub async fn list(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.store.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<UserResponse> {
        self.find(id).await.map(UserResponse::from)
    }

    /// Soft-delete the caller's own account, returning the record as it was
    /// before deletion.
    pub async fn delete_by_id(&self, user_id: DbId, id: DbId) -> AppResult<UserResponse> {
        let user = self.find(id).await?;
        ensure_owner(&user, user_id)?;
        if !self.store.soft_delete(id).await? {
            return Err(CoreError::not_found(ENTITY, id).into());
        }
        Ok(UserResponse::from(user))
    }

    /// Update the caller's own profile.
    pub async fn update_by_id(
        &self,
        user_id: DbId,
        id: DbId,
        patch: UpdateUser,
    ) -> AppResult<UserResponse> {
        let current = self.find(id).await?;
        ensure_owner(&current, user_id)?;

        let merged = User {
            username: self.merge.username.apply(current.username, patch.username),
            email: self.merge.email.apply(current.email, patch.email),
            date_of_birth: self
                .merge
                .date_of_birth
                .apply(current.date_of_birth, patch.date_of_birth.map(Some)),
            ..current
        };

        let updated = self
            .store
            .update(&merged)
            .await
            .map_err(|e| username_conflict(e, &merged.username))?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))?;

        Ok(UserResponse::from(updated))
    }

    /// Validate the payload, hash the password and persist the new user.
    pub async fn sign_up(&self, req: SignUpRequest) -> AppResult<UserResponse> {
        let date_of_birth = validate_sign_up(
            &req.username,
            &req.password,
            req.date_of_birth.as_deref(),
            Utc::now(),
        )?;

        let password_hash = hash_password(&req.password)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

        let input = CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
            date_of_birth: Some(date_of_birth),
        };
        let user = self
            .store
            .create(&input)
            .await
            .map_err(|e| username_conflict(e, &input.username))?;

        Ok(UserResponse::from(user))
    }

    /// Check credentials and issue an access token.
    pub async fn sign_in(&self, req: SignInRequest) -> AppResult<(UserResponse, String)> {
        let user = self
            .store
            .find_by_identifier(&req.identifier)
            .await?
            .ok_or_else(|| CoreError::not_found_by(ENTITY, "identifier", &req.identifier))?;

        let valid = verify_password(&req.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
        if !valid {
            return Err(CoreError::Unauthorized("invalid credentials".into()).into());
        }

        let token = issue_access_token(&user, &self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token signing failed: {e}")))?;

        Ok((UserResponse::from(user), token))
    }

    async fn find(&self, id: DbId) -> AppResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id).into())
    }
}

fn username_conflict(err: StoreError, username: &str) -> AppError {
    match err {
        StoreError::UniqueViolation(_) => {
            CoreError::Conflict(format!("username '{username}' is already taken")).into()
        }
        other => other.into(),
    }
}
