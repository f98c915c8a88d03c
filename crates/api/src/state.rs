use std::sync::Arc;

use mygram_db::memory::MemoryStore;
use mygram_db::repositories::{CommentRepo, PhotoRepo, SocialMediaRepo, UserRepo};
use mygram_db::store::{CommentStore, PhotoStore, SocialMediaStore, UserStore};
use mygram_db::DbPool;

use crate::config::ServerConfig;
use crate::services::{CommentService, PhotoService, SocialMediaService, UserService};

/// One handle per persistence trait.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub photos: Arc<dyn PhotoStore>,
    pub comments: Arc<dyn CommentStore>,
    pub social_medias: Arc<dyn SocialMediaStore>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(UserRepo::new(pool.clone())),
            photos: Arc::new(PhotoRepo::new(pool.clone())),
            comments: Arc::new(CommentRepo::new(pool.clone())),
            social_medias: Arc::new(SocialMediaRepo::new(pool.clone())),
        }
    }

    /// A single in-memory store serving every trait.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            photos: store.clone(),
            comments: store.clone(),
            social_medias: store,
        }
    }
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used by the health check. `None` when the
    /// services run on the in-memory store.
    pub pool: Option<DbPool>,
    pub config: Arc<ServerConfig>,
    pub users: Arc<UserService>,
    pub photos: Arc<PhotoService>,
    pub comments: Arc<CommentService>,
    pub social_medias: Arc<SocialMediaService>,
}

impl AppState {
    /// Wire every service to `stores` using the merge policies in `config`.
    pub fn new(config: ServerConfig, stores: Stores, pool: Option<DbPool>) -> Self {
        let merge = config.merge;
        Self {
            pool,
            users: Arc::new(UserService::new(
                stores.users,
                config.jwt.clone(),
                merge.user,
            )),
            photos: Arc::new(PhotoService::new(stores.photos.clone(), merge.photo)),
            comments: Arc::new(CommentService::new(
                stores.comments,
                stores.photos,
                merge.comment,
            )),
            social_medias: Arc::new(SocialMediaService::new(
                stores.social_medias,
                merge.social_media,
            )),
            config: Arc::new(config),
        }
    }

    pub fn postgres(config: ServerConfig, pool: DbPool) -> Self {
        Self::new(config, Stores::postgres(&pool), Some(pool))
    }

    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(config, Stores::memory(), None)
    }
}
