//! In-memory store implementing every persistence trait.
//!
//! Intended for tests/dev. Mirrors the PostgreSQL schema rules that the
//! services rely on: auto-incrementing ids, the unique username index,
//! soft-deleted users hidden from lookups and joins, and the cascade from a
//! photo to its comments.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use mygram_core::types::DbId;

use crate::models::comment::{Comment, CommentWithRelations, CreateComment};
use crate::models::photo::{CreatePhoto, Photo, PhotoSummary, PhotoWithOwner};
use crate::models::social_media::{CreateSocialMedia, SocialMedia, SocialMediaWithOwner};
use crate::models::user::{CreateUser, OwnerSummary, User};
use crate::store::{
    CommentStore, PhotoStore, SocialMediaStore, StoreError, StoreResult, UserStore,
};

const USERNAME_CONSTRAINT: &str = "uq_users_username";

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<DbId, User>,
    photos: BTreeMap<DbId, Photo>,
    comments: BTreeMap<DbId, Comment>,
    social_medias: BTreeMap<DbId, SocialMedia>,
    next_user_id: DbId,
    next_photo_id: DbId,
    next_comment_id: DbId,
    next_social_media_id: DbId,
}

impl Tables {
    fn live_user(&self, id: DbId) -> Option<&User> {
        self.users.get(&id).filter(|u| u.deleted_at.is_none())
    }

    fn owner_summary(&self, user_id: DbId) -> Option<OwnerSummary> {
        self.live_user(user_id).map(|u| OwnerSummary {
            id: u.id,
            email: u.email.clone(),
            username: u.username.clone(),
        })
    }

    fn username_taken(&self, username: &str, except: Option<DbId>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }
}

fn next_id(counter: &mut DbId) -> DbId {
    *counter += 1;
    *counter
}

/// Process-local store for all four resources.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.write()?;
        if tables.username_taken(&input.username, None) {
            return Err(StoreError::UniqueViolation(USERNAME_CONSTRAINT.to_string()));
        }
        let now = Utc::now();
        let user = User {
            id: next_id(&mut tables.next_user_id),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            date_of_birth: input.date_of_birth,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.read()?.live_user(id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> StoreResult<Option<User>> {
        let tables = self.read()?;
        let live = || tables.users.values().filter(|u| u.deleted_at.is_none());
        let found = live()
            .find(|u| u.username == identifier)
            .or_else(|| live().find(|u| u.email == identifier))
            .cloned();
        Ok(found)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let tables = self.read()?;
        Ok(tables
            .users
            .values()
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn update(&self, user: &User) -> StoreResult<Option<User>> {
        let mut tables = self.write()?;
        if tables.live_user(user.id).is_none() {
            return Ok(None);
        }
        if tables.username_taken(&user.username, Some(user.id)) {
            return Err(StoreError::UniqueViolation(USERNAME_CONSTRAINT.to_string()));
        }
        let Some(stored) = tables.users.get_mut(&user.id) else {
            return Ok(None);
        };
        stored.username = user.username.clone();
        stored.email = user.email.clone();
        stored.date_of_birth = user.date_of_birth;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn soft_delete(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.write()?;
        match tables.users.get_mut(&id) {
            Some(user) if user.deleted_at.is_none() => {
                user.deleted_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn create(&self, user_id: DbId, input: &CreatePhoto) -> StoreResult<Photo> {
        let mut tables = self.write()?;
        let now = Utc::now();
        let photo = Photo {
            id: next_id(&mut tables.next_photo_id),
            title: input.title.clone(),
            caption: input.caption.clone(),
            url: input.url.clone(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.photos.insert(photo.id, photo.clone());
        Ok(photo)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Photo>> {
        Ok(self.read()?.photos.get(&id).cloned())
    }

    async fn list_with_owner(&self) -> StoreResult<Vec<PhotoWithOwner>> {
        let tables = self.read()?;
        Ok(tables
            .photos
            .values()
            .map(|photo| PhotoWithOwner {
                photo: photo.clone(),
                owner: tables.owner_summary(photo.user_id),
            })
            .collect())
    }

    async fn update(&self, photo: &Photo) -> StoreResult<Option<Photo>> {
        let mut tables = self.write()?;
        let Some(stored) = tables.photos.get_mut(&photo.id) else {
            return Ok(None);
        };
        stored.title = photo.title.clone();
        stored.caption = photo.caption.clone();
        stored.url = photo.url.clone();
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.write()?;
        if tables.photos.remove(&id).is_none() {
            return Ok(false);
        }
        // ON DELETE CASCADE
        tables.comments.retain(|_, c| c.photo_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create(&self, user_id: DbId, input: &CreateComment) -> StoreResult<Comment> {
        let mut tables = self.write()?;
        let now = Utc::now();
        let comment = Comment {
            id: next_id(&mut tables.next_comment_id),
            message: input.message.clone(),
            photo_id: input.photo_id,
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Comment>> {
        Ok(self.read()?.comments.get(&id).cloned())
    }

    async fn list_with_relations(&self) -> StoreResult<Vec<CommentWithRelations>> {
        let tables = self.read()?;
        Ok(tables
            .comments
            .values()
            .map(|comment| CommentWithRelations {
                comment: comment.clone(),
                owner: tables.owner_summary(comment.user_id),
                photo: tables.photos.get(&comment.photo_id).map(PhotoSummary::from),
            })
            .collect())
    }

    async fn update(&self, comment: &Comment) -> StoreResult<Option<Comment>> {
        let mut tables = self.write()?;
        let Some(stored) = tables.comments.get_mut(&comment.id) else {
            return Ok(None);
        };
        stored.message = comment.message.clone();
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.write()?.comments.remove(&id).is_some())
    }
}

#[async_trait]
impl SocialMediaStore for MemoryStore {
    async fn create(&self, user_id: DbId, input: &CreateSocialMedia) -> StoreResult<SocialMedia> {
        let mut tables = self.write()?;
        let now = Utc::now();
        let social_media = SocialMedia {
            id: next_id(&mut tables.next_social_media_id),
            name: input.name.clone(),
            url: input.url.clone(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables
            .social_medias
            .insert(social_media.id, social_media.clone());
        Ok(social_media)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<SocialMedia>> {
        Ok(self.read()?.social_medias.get(&id).cloned())
    }

    async fn list_with_owner(&self) -> StoreResult<Vec<SocialMediaWithOwner>> {
        let tables = self.read()?;
        Ok(tables
            .social_medias
            .values()
            .map(|social_media| SocialMediaWithOwner {
                social_media: social_media.clone(),
                owner: tables.owner_summary(social_media.user_id),
            })
            .collect())
    }

    async fn update(&self, social_media: &SocialMedia) -> StoreResult<Option<SocialMedia>> {
        let mut tables = self.write()?;
        let Some(stored) = tables.social_medias.get_mut(&social_media.id) else {
            return Ok(None);
        };
        stored.name = social_media.name.clone();
        stored.url = social_media.url.clone();
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.write()?.social_medias.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn new_user(username: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "hash".to_string(),
            date_of_birth: None,
        }
    }

    fn new_photo(title: &str) -> CreatePhoto {
        CreatePhoto {
            title: title.to_string(),
            caption: String::new(),
            url: "https://example.com/p.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn ids_increment_per_table() {
        let store = MemoryStore::new();
        let a = UserStore::create(&store, &new_user("a")).await.unwrap();
        let b = UserStore::create(&store, &new_user("b")).await.unwrap();
        let p = PhotoStore::create(&store, a.id, &new_photo("x")).await.unwrap();
        assert_eq!((a.id, b.id, p.id), (1, 2, 1));
    }

    #[tokio::test]
    async fn duplicate_username_is_a_unique_violation() {
        let store = MemoryStore::new();
        UserStore::create(&store, &new_user("alice")).await.unwrap();
        let err = UserStore::create(&store, &new_user("alice")).await.unwrap_err();
        assert_matches!(err, StoreError::UniqueViolation(name) if name == "uq_users_username");
    }

    #[tokio::test]
    async fn soft_deleted_user_is_hidden() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, &new_user("alice")).await.unwrap();
        PhotoStore::create(&store, user.id, &new_photo("x")).await.unwrap();

        assert!(store.soft_delete(user.id).await.unwrap());
        assert!(!store.soft_delete(user.id).await.unwrap());
        assert!(UserStore::find_by_id(&store, user.id).await.unwrap().is_none());
        assert!(store.find_by_identifier("alice").await.unwrap().is_none());
        assert!(store.list().await.unwrap().is_empty());

        let photos = PhotoStore::list_with_owner(&store).await.unwrap();
        assert_eq!(photos.len(), 1);
        assert!(photos[0].owner.is_none());
    }

    #[tokio::test]
    async fn identifier_matches_username_or_email() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, &new_user("alice")).await.unwrap();
        let by_name = store.find_by_identifier("alice").await.unwrap().unwrap();
        let by_email = store
            .find_by_identifier("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.id, user.id);
        assert_eq!(by_email.id, user.id);
    }

    #[tokio::test]
    async fn deleting_a_photo_cascades_to_comments() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, &new_user("alice")).await.unwrap();
        let photo = PhotoStore::create(&store, user.id, &new_photo("x")).await.unwrap();
        let comment = CommentStore::create(
            &store,
            user.id,
            &CreateComment {
                message: "nice".into(),
                photo_id: photo.id,
            },
        )
        .await
        .unwrap();

        let listed = store.list_with_relations().await.unwrap();
        assert_eq!(listed[0].photo.as_ref().map(|p| p.id), Some(photo.id));

        assert!(PhotoStore::delete(&store, photo.id).await.unwrap());
        assert!(CommentStore::find_by_id(&store, comment.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_never_changes_owner() {
        let store = MemoryStore::new();
        let photo = PhotoStore::create(&store, 7, &new_photo("x")).await.unwrap();
        let mut patched = photo.clone();
        patched.title = "y".into();
        patched.user_id = 99;
        let updated = PhotoStore::update(&store, &patched).await.unwrap().unwrap();
        assert_eq!(updated.title, "y");
        assert_eq!(updated.user_id, 7);
    }
}
