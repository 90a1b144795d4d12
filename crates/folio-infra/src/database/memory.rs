//! In-memory repositories - used when no database is configured, and in tests.
//! Note: Data is lost on process restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use folio_core::domain::{Category, NewCategory, NewPost, Page, PageRequest, Post};
use folio_core::error::RepoError;
use folio_core::ports::{BaseRepository, CategoryRepository, PostRepository};

fn paginate<T: Clone>(sorted: &[T], page: PageRequest) -> Page<T> {
    let items = sorted
        .iter()
        .skip(page.offset() as usize)
        .take(page.per_page as usize)
        .cloned()
        .collect();
    Page::new(items, page, sorted.len() as u64)
}

/// In-memory post repository with monotonically increasing ids.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<i64, Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Every post, newest first.
    async fn sorted(&self) -> Vec<Post> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            title: new_post.title,
            content: new_post.content,
            image: new_post.image,
            category_id: new_post.category_id,
            created_at: now,
            updated_at: now,
        };

        self.store.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let existing = store.get(&post.id).ok_or(RepoError::NotFound)?;

        post.created_at = existing.created_at;
        post.updated_at = Utc::now();
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn list_page(&self, page: PageRequest) -> Result<Page<Post>, RepoError> {
        Ok(paginate(&self.sorted().await, page))
    }

    async fn count_by_image(&self, image: &str) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().filter(|p| p.image == image).count() as u64)
    }

    async fn count_by_category(&self, category_id: i64) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .count() as u64)
    }
}

/// In-memory category repository with monotonically increasing ids.
pub struct InMemoryCategoryRepository {
    store: RwLock<HashMap<i64, Category>>,
    next_id: AtomicI64,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Every category, ordered by name.
    async fn sorted(&self) -> Vec<Category> {
        let store = self.store.read().await;
        let mut categories: Vec<Category> = store.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        categories
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Category, i64> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category, RepoError> {
        let now = Utc::now();
        let category = Category {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: new_category.name,
            created_at: now,
            updated_at: now,
        };

        self.store
            .write()
            .await
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, mut category: Category) -> Result<Category, RepoError> {
        let mut store = self.store.write().await;
        let existing = store.get(&category.id).ok_or(RepoError::NotFound)?;

        category.created_at = existing.created_at;
        category.updated_at = Utc::now();
        store.insert(category.id, category.clone());
        Ok(category)
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.sorted().await)
    }

    async fn list_page(&self, page: PageRequest) -> Result<Page<Category>, RepoError> {
        Ok(paginate(&self.sorted().await, page))
    }
}
