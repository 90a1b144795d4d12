//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::ports::{AssetStore, CategoryRepository, PostRepository};
use folio_core::services::{CategoryService, PostService};
use folio_infra::{
    InMemoryAssetStore, InMemoryCategoryRepository, InMemoryPostRepository, LocalAssetStore,
};

#[cfg(feature = "postgres")]
use folio_infra::{DatabasePool, PostgresCategoryRepository, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub categories: CategoryService,
    pub assets: Arc<dyn AssetStore>,
    pub posts_per_page: u64,
    #[cfg(feature = "postgres")]
    pub db: Option<DatabasePool>,
}

impl AppState {
    /// Wire services to the given adapters.
    pub fn from_parts(
        post_repo: Arc<dyn PostRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        assets: Arc<dyn AssetStore>,
        config: &AppConfig,
    ) -> Self {
        let posts = PostService::new(post_repo.clone(), category_repo.clone(), assets.clone())
            .with_max_image_bytes(config.max_image_bytes);
        let categories = CategoryService::new(category_repo, post_repo);

        Self {
            posts,
            categories,
            assets,
            posts_per_page: config.posts_per_page,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Everything in memory. Data is lost on restart.
    #[cfg(test)]
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::with_memory_repositories(Arc::new(InMemoryAssetStore::new()), config)
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let assets: Arc<dyn AssetStore> = match &config.asset_dir {
            Some(dir) => Arc::new(
                LocalAssetStore::open(dir)
                    .await
                    .map_err(std::io::Error::other)?,
            ),
            None => {
                tracing::warn!("ASSET_DIR not set. Images are kept in memory.");
                Arc::new(InMemoryAssetStore::new())
            }
        };

        // Initialize database connections if configured
        #[cfg(feature = "postgres")]
        let state = {
            if let Some(db_config) = &config.database {
                match DatabasePool::connect(db_config).await {
                    Ok(pool) => {
                        let mut state = Self::from_parts(
                            Arc::new(PostgresPostRepository::new(pool.conn.clone())),
                            Arc::new(PostgresCategoryRepository::new(pool.conn.clone())),
                            assets,
                            config,
                        );
                        state.db = Some(pool);
                        state
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Self::with_memory_repositories(assets, config)
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::with_memory_repositories(assets, config)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::with_memory_repositories(assets, config)
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }

    fn with_memory_repositories(assets: Arc<dyn AssetStore>, config: &AppConfig) -> Self {
        Self::from_parts(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryCategoryRepository::new()),
            assets,
            config,
        )
    }
}
