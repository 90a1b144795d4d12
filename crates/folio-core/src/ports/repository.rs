use async_trait::async_trait;

use crate::domain::{Category, NewCategory, NewPost, Page, PageRequest, Post};
use crate::error::RepoError;

/// Generic repository trait defining the operations every entity supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] if nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Insert a post; the repository assigns the id and timestamps.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite every mutable field of an existing post and bump `updated_at`.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Newest first, by creation time then id.
    async fn list_page(&self, page: PageRequest) -> Result<Page<Post>, RepoError>;

    /// Number of posts whose image is `image`.
    async fn count_by_image(&self, image: &str) -> Result<u64, RepoError>;

    async fn count_by_category(&self, category_id: i64) -> Result<u64, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {
    async fn create(&self, category: NewCategory) -> Result<Category, RepoError>;

    async fn update(&self, category: Category) -> Result<Category, RepoError>;

    /// Every category, ordered by name.
    async fn list_all(&self) -> Result<Vec<Category>, RepoError>;

    /// Ordered by name.
    async fn list_page(&self, page: PageRequest) -> Result<Page<Category>, RepoError>;
}
