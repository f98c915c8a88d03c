use std::sync::Arc;

use mygram_core::error::CoreError;
use mygram_core::ownership::{ensure_owner, Owned};
use mygram_core::types::DbId;
use mygram_db::models::photo::{
    CreatePhoto, Photo, PhotoListItem, PhotoUpdateResponse, UpdatePhoto,
};
use mygram_db::store::PhotoStore;
use validator::Validate;

use crate::config::PhotoMergePolicy;
use crate::error::AppResult;

pub struct PhotoService {
    store: Arc<dyn PhotoStore>,
    merge: PhotoMergePolicy,
}

impl PhotoService {
    pub fn new(store: Arc<dyn PhotoStore>, merge: PhotoMergePolicy) -> Self {
        Self { store, merge }
    }

    /// Create a photo owned by `user_id`. The payload is validated before the
    /// store is touched.
    pub async fn create(&self, user_id: DbId, input: CreatePhoto) -> AppResult<Photo> {
        input.validate()?;
        Ok(self.store.create(user_id, &input).await?)
    }

    pub async fn list(&self) -> AppResult<Vec<PhotoListItem>> {
        let rows = self.store.list_with_owner().await?;
        Ok(rows.into_iter().map(PhotoListItem::from).collect())
    }

    pub async fn update(
        &self,
        user_id: DbId,
        id: DbId,
        patch: UpdatePhoto,
    ) -> AppResult<PhotoUpdateResponse> {
        let current = self.find(id).await?;
        ensure_owner(&current, user_id)?;

        let merged = Photo {
            title: self.merge.title.apply(current.title, patch.title),
            caption: self.merge.caption.apply(current.caption, patch.caption),
            url: self.merge.url.apply(current.url, patch.url),
            ..current
        };

        let updated = self
            .store
            .update(&merged)
            .await?
            .ok_or_else(|| CoreError::not_found(Photo::ENTITY, id))?;
        Ok(PhotoUpdateResponse::from(updated))
    }

    /// Delete a photo and, through the store's cascade, its comments.
    pub async fn delete(&self, user_id: DbId, id: DbId) -> AppResult<()> {
        let current = self.find(id).await?;
        ensure_owner(&current, user_id)?;

        if !self.store.delete(id).await? {
            return Err(CoreError::not_found(Photo::ENTITY, id).into());
        }
        Ok(())
    }

    async fn find(&self, id: DbId) -> AppResult<Photo> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(Photo::ENTITY, id).into())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mygram_core::merge::MergePolicy;
    use mygram_db::memory::MemoryStore;

    use super::*;
    use crate::error::AppError;

    fn service() -> (PhotoService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let svc = PhotoService::new(store.clone(), PhotoMergePolicy::default());
        (svc, store)
    }

    fn new_photo() -> CreatePhoto {
        CreatePhoto {
            title: "Sunset".into(),
            caption: "At the beach".into(),
            url: "https://example.com/sunset.jpg".into(),
        }
    }

    #[tokio::test]
    async fn empty_url_fails_before_any_store_call() {
        let (svc, store) = service();
        let input = CreatePhoto {
            url: String::new(),
            ..new_photo()
        };
        assert_matches!(svc.create(7, input).await, Err(AppError::Validation(_)));
        assert!(store.list_with_owner().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_owner_update_leaves_photo_unchanged() {
        let (svc, store) = service();
        let photo = svc.create(7, new_photo()).await.unwrap();

        let err = svc
            .update(
                8,
                photo.id,
                UpdatePhoto {
                    title: Some("Stolen".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::NotOwner {
                owner_id: 7,
                user_id: 8,
                ..
            })
        );
        assert_eq!(store.find_by_id(photo.id).await.unwrap().unwrap(), photo);
    }

    #[tokio::test]
    async fn non_owner_delete_is_rejected() {
        let (svc, store) = service();
        let photo = svc.create(7, new_photo()).await.unwrap();

        assert_matches!(
            svc.delete(8, photo.id).await,
            Err(AppError::Core(CoreError::NotOwner { .. }))
        );
        assert!(store.find_by_id(photo.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_with_all_fields_is_idempotent() {
        let (svc, _) = service();
        let photo = svc.create(7, new_photo()).await.unwrap();
        let patch = UpdatePhoto {
            title: Some("New".into()),
            caption: Some("Caption".into()),
            url: Some("https://example.com/new.jpg".into()),
        };

        let first = svc.update(7, photo.id, patch.clone()).await.unwrap();
        let second = svc.update(7, photo.id, patch).await.unwrap();
        assert_eq!(
            (&first.title, &first.caption, &first.url),
            (&second.title, &second.caption, &second.url)
        );
    }

    #[tokio::test]
    async fn merge_policy_controls_omitted_fields() {
        let (svc, _) = service();
        let photo = svc.create(7, new_photo()).await.unwrap();
        let patch = UpdatePhoto {
            title: Some("Renamed".into()),
            ..Default::default()
        };
        let merged = svc.update(7, photo.id, patch.clone()).await.unwrap();
        assert_eq!(merged.caption, "At the beach");

        let overwrite = PhotoService::new(
            Arc::new(MemoryStore::new()),
            PhotoMergePolicy {
                caption: MergePolicy::Overwrite,
                ..Default::default()
            },
        );
        let photo = overwrite.create(7, new_photo()).await.unwrap();
        let replaced = overwrite.update(7, photo.id, patch).await.unwrap();
        assert_eq!(replaced.caption, "");
    }

    #[tokio::test]
    async fn create_then_list_carries_owner_id() {
        let (svc, _) = service();
        let photo = svc.create(7, new_photo()).await.unwrap();
        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, photo.id);
        assert_eq!(listed[0].user_id, 7);
    }

    #[tokio::test]
    async fn missing_photo_is_not_found() {
        let (svc, _) = service();
        assert_matches!(
            svc.delete(7, 99).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Photo", .. }))
        );
    }
}
