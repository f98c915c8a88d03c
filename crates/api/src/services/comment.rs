use std::sync::Arc;

use mygram_core::error::CoreError;
use mygram_core::ownership::{ensure_owner, Owned};
use mygram_core::types::DbId;
use mygram_db::models::comment::{
    Comment, CommentListItem, CommentUpdateResponse, CreateComment, UpdateComment,
};
use mygram_db::models::photo::Photo;
use mygram_db::store::{CommentStore, PhotoStore};
use validator::Validate;

use crate::config::CommentMergePolicy;
use crate::error::AppResult;

pub struct CommentService {
    store: Arc<dyn CommentStore>,
    photos: Arc<dyn PhotoStore>,
    merge: CommentMergePolicy,
}

impl CommentService {
    pub fn new(
        store: Arc<dyn CommentStore>,
        photos: Arc<dyn PhotoStore>,
        merge: CommentMergePolicy,
    ) -> Self {
        Self {
            store,
            photos,
            merge,
        }
    }

    /// Comment on an existing photo as `user_id`.
    pub async fn create(&self, user_id: DbId, input: CreateComment) -> AppResult<Comment> {
        input.validate()?;
        if self.photos.find_by_id(input.photo_id).await?.is_none() {
            return Err(CoreError::not_found(Photo::ENTITY, input.photo_id).into());
        }
        Ok(self.store.create(user_id, &input).await?)
    }

    pub async fn list(&self) -> AppResult<Vec<CommentListItem>> {
        let rows = self.store.list_with_relations().await?;
        Ok(rows.into_iter().map(CommentListItem::from).collect())
    }

    pub async fn update(
        &self,
        user_id: DbId,
        id: DbId,
        patch: UpdateComment,
    ) -> AppResult<CommentUpdateResponse> {
        let current = self.find(id).await?;
        ensure_owner(&current, user_id)?;

        let merged = Comment {
            message: self.merge.message.apply(current.message, patch.message),
            ..current
        };

        let updated = self
            .store
            .update(&merged)
            .await?
            .ok_or_else(|| CoreError::not_found(Comment::ENTITY, id))?;
        Ok(CommentUpdateResponse::from(updated))
    }

    pub async fn delete(&self, user_id: DbId, id: DbId) -> AppResult<()> {
        let current = self.find(id).await?;
        ensure_owner(&current, user_id)?;

        if !self.store.delete(id).await? {
            return Err(CoreError::not_found(Comment::ENTITY, id).into());
        }
        Ok(())
    }

    async fn find(&self, id: DbId) -> AppResult<Comment> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(Comment::ENTITY, id).into())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mygram_db::memory::MemoryStore;
    use mygram_db::models::photo::CreatePhoto;

    use super::*;
    use crate::error::AppError;

    fn service() -> (CommentService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let svc = CommentService::new(
            store.clone(),
            store.clone(),
            CommentMergePolicy::default(),
        );
        (svc, store)
    }

    async fn seed_photo(store: &MemoryStore, owner: DbId) -> Photo {
        PhotoStore::create(
            store,
            owner,
            &CreatePhoto {
                title: "Sunset".into(),
                caption: String::new(),
                url: "https://example.com/sunset.jpg".into(),
            },
        )
        .await
        .unwrap()
    }

    fn comment_on(photo_id: DbId, message: &str) -> CreateComment {
        CreateComment {
            message: message.into(),
            photo_id,
        }
    }

    #[tokio::test]
    async fn comment_on_missing_photo_is_not_found() {
        let (svc, _) = service();
        assert_matches!(
            svc.create(7, comment_on(42, "hello")).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Photo", .. }))
        );
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let (svc, store) = service();
        let photo = seed_photo(&store, 1).await;
        assert_matches!(
            svc.create(7, comment_on(photo.id, "")).await,
            Err(AppError::Validation(_))
        );
    }

    #[tokio::test]
    async fn owner_delete_then_fetch_is_not_found() {
        let (svc, store) = service();
        let photo = seed_photo(&store, 1).await;
        let comment = svc.create(7, comment_on(photo.id, "nice")).await.unwrap();

        svc.delete(7, comment.id).await.unwrap();
        assert_matches!(
            svc.find(comment.id).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Comment", .. }))
        );
    }

    #[tokio::test]
    async fn non_owner_update_is_rejected() {
        let (svc, store) = service();
        let photo = seed_photo(&store, 1).await;
        let comment = svc.create(7, comment_on(photo.id, "nice")).await.unwrap();

        let patch = UpdateComment {
            message: Some("edited".into()),
        };
        assert_matches!(
            svc.update(1, comment.id, patch).await,
            Err(AppError::Core(CoreError::NotOwner { .. }))
        );
        assert_eq!(svc.find(comment.id).await.unwrap().message, "nice");
    }

    #[tokio::test]
    async fn list_embeds_photo_and_author() {
        let (svc, store) = service();
        let author = mygram_db::store::UserStore::create(
            store.as_ref(),
            &mygram_db::models::user::CreateUser {
                username: "alice".into(),
                email: "alice@example.com".into(),
                password_hash: "hash".into(),
                date_of_birth: None,
            },
        )
        .await
        .unwrap();
        let photo = seed_photo(&store, author.id).await;
        svc.create(author.id, comment_on(photo.id, "nice")).await.unwrap();

        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user.as_ref().map(|u| u.username.as_str()), Some("alice"));
        assert_eq!(listed[0].photo.as_ref().map(|p| p.id), Some(photo.id));
    }
}
