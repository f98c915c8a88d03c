use std::sync::Arc;

use mygram_core::error::CoreError;
use mygram_core::ownership::{ensure_owner, Owned};
use mygram_core::types::DbId;
use mygram_db::models::social_media::{
    CreateSocialMedia, SocialMedia, SocialMediaListItem, SocialMediaUpdateResponse,
    UpdateSocialMedia,
};
use mygram_db::store::SocialMediaStore;
use validator::Validate;

use crate::config::SocialMediaMergePolicy;
use crate::error::AppResult;

pub struct SocialMediaService {
    store: Arc<dyn SocialMediaStore>,
    merge: SocialMediaMergePolicy,
}

impl SocialMediaService {
    pub fn new(store: Arc<dyn SocialMediaStore>, merge: SocialMediaMergePolicy) -> Self {
        Self { store, merge }
    }

    pub async fn create(&self, user_id: DbId, input: CreateSocialMedia) -> AppResult<SocialMedia> {
        input.validate()?;
        Ok(self.store.create(user_id, &input).await?)
    }

    pub async fn list(&self) -> AppResult<Vec<SocialMediaListItem>> {
        let rows = self.store.list_with_owner().await?;
        Ok(rows.into_iter().map(SocialMediaListItem::from).collect())
    }

    pub async fn update(
        &self,
        user_id: DbId,
        id: DbId,
        patch: UpdateSocialMedia,
    ) -> AppResult<SocialMediaUpdateResponse> {
        patch.validate()?;
        let current = self.find(id).await?;
        ensure_owner(&current, user_id)?;

        let merged = SocialMedia {
            name: self.merge.name.apply(current.name, patch.name),
            url: self.merge.url.apply(current.url, patch.url),
            ..current
        };

        let updated = self
            .store
            .update(&merged)
            .await?
            .ok_or_else(|| CoreError::not_found(SocialMedia::ENTITY, id))?;
        Ok(SocialMediaUpdateResponse::from(updated))
    }

    pub async fn delete(&self, user_id: DbId, id: DbId) -> AppResult<()> {
        let current = self.find(id).await?;
        ensure_owner(&current, user_id)?;

        if !self.store.delete(id).await? {
            return Err(CoreError::not_found(SocialMedia::ENTITY, id).into());
        }
        Ok(())
    }

    async fn find(&self, id: DbId) -> AppResult<SocialMedia> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(SocialMedia::ENTITY, id).into())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mygram_db::memory::MemoryStore;

    use super::*;
    use crate::error::AppError;

    fn service() -> (SocialMediaService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let svc = SocialMediaService::new(store.clone(), SocialMediaMergePolicy::default());
        (svc, store)
    }

    fn new_link() -> CreateSocialMedia {
        CreateSocialMedia {
            name: "instagram".into(),
            url: "https://instagram.com/alice".into(),
        }
    }

    #[tokio::test]
    async fn create_requires_name_and_url() {
        let (svc, store) = service();
        let input = CreateSocialMedia {
            name: String::new(),
            ..new_link()
        };
        assert_matches!(svc.create(1, input).await, Err(AppError::Validation(_)));
        assert!(store.list_with_owner().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_malformed_url() {
        let (svc, store) = service();
        let link = svc.create(1, new_link()).await.unwrap();
        let patch = UpdateSocialMedia {
            name: None,
            url: Some("not a url".into()),
        };
        assert_matches!(svc.update(1, link.id, patch).await, Err(AppError::Validation(_)));
        assert_eq!(store.find_by_id(link.id).await.unwrap().unwrap(), link);
    }

    #[tokio::test]
    async fn update_with_all_fields_is_idempotent() {
        let (svc, _) = service();
        let link = svc.create(1, new_link()).await.unwrap();
        let patch = UpdateSocialMedia {
            name: Some("mastodon".into()),
            url: Some("https://mastodon.social/@alice".into()),
        };
        let first = svc.update(1, link.id, patch.clone()).await.unwrap();
        let second = svc.update(1, link.id, patch).await.unwrap();
        assert_eq!((&first.name, &first.url), (&second.name, &second.url));
        assert_eq!(first.name, "mastodon");
    }

    #[tokio::test]
    async fn non_owner_cannot_delete() {
        let (svc, store) = service();
        let link = svc.create(1, new_link()).await.unwrap();
        assert_matches!(
            svc.delete(2, link.id).await,
            Err(AppError::Core(CoreError::NotOwner { .. }))
        );
        assert!(store.find_by_id(link.id).await.unwrap().is_some());

        svc.delete(1, link.id).await.unwrap();
        assert!(store.find_by_id(link.id).await.unwrap().is_none());
    }
}
