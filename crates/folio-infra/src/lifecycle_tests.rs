//! Post lifecycle tests: the core service wired to the in-memory adapters.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use folio_core::DomainError;
use folio_core::domain::{DEFAULT_MAX_IMAGE_BYTES, ImageUpload, NewPost, Page, PageRequest, Post};
use folio_core::error::{AssetError, RepoError};
use folio_core::ports::{AssetStore, BaseRepository, CategoryRepository, PostRepository};
use folio_core::services::{CategoryService, NewPostInput, PostService, UpdatePostInput};

use crate::assets::InMemoryAssetStore;
use crate::database::{InMemoryCategoryRepository, InMemoryPostRepository};

/// Asset store that counts calls and can be told to fail.
#[derive(Default)]
struct RecordingAssetStore {
    inner: InMemoryAssetStore,
    puts: AtomicUsize,
    deletes: AtomicUsize,
    fail_put: AtomicBool,
    fail_delete: AtomicBool,
}

impl RecordingAssetStore {
    fn calls(&self) -> usize {
        self.puts.load(Ordering::SeqCst) + self.deletes.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.puts.store(0, Ordering::SeqCst);
        self.deletes.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl AssetStore for RecordingAssetStore {
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<String, AssetError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(AssetError::Write("no space left on device".to_string()));
        }
        self.inner.put(bytes, extension).await
    }

    async fn delete(&self, name: &str) -> Result<(), AssetError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AssetError::Delete {
                name: name.to_string(),
                reason: "permission denied".to_string(),
            });
        }
        self.inner.delete(name).await
    }

    async fn exists(&self, name: &str) -> Result<bool, AssetError> {
        self.inner.exists(name).await
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.inner.get(name).await
    }
}

/// Post repository whose writes can be told to fail.
#[derive(Default)]
struct FailingPostRepository {
    inner: InMemoryPostRepository,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
}

#[async_trait]
impl BaseRepository<Post, i64> for FailingPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(RepoError::Connection("connection reset".to_string()));
        }
        self.inner.delete(id).await
    }
}

#[async_trait]
impl PostRepository for FailingPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(RepoError::Query("value too long for column".to_string()));
        }
        self.inner.create(post).await
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        self.inner.update(post).await
    }

    async fn list_page(&self, page: PageRequest) -> Result<Page<Post>, RepoError> {
        self.inner.list_page(page).await
    }

    async fn count_by_image(&self, image: &str) -> Result<u64, RepoError> {
        self.inner.count_by_image(image).await
    }

    async fn count_by_category(&self, category_id: i64) -> Result<u64, RepoError> {
        self.inner.count_by_category(category_id).await
    }
}

fn service_with_failing_posts() -> (Arc<FailingPostRepository>, Arc<InMemoryAssetStore>, PostService) {
    let posts = Arc::new(FailingPostRepository::default());
    let assets = Arc::new(InMemoryAssetStore::new());
    let service = PostService::new(
        posts.clone(),
        Arc::new(InMemoryCategoryRepository::new()),
        assets.clone(),
    );
    (posts, assets, service)
}

struct Harness {
    posts: Arc<InMemoryPostRepository>,
    categories: Arc<InMemoryCategoryRepository>,
    assets: Arc<RecordingAssetStore>,
    service: PostService,
}

impl Harness {
    fn new() -> Self {
        let posts = Arc::new(InMemoryPostRepository::new());
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let assets = Arc::new(RecordingAssetStore::default());
        let service = PostService::new(posts.clone(), categories.clone(), assets.clone());
        Self {
            posts,
            categories,
            assets,
            service,
        }
    }

    async fn category(&self, name: &str) -> i64 {
        self.categories
            .create(folio_core::domain::NewCategory {
                name: name.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn create(&self, title: &str, seed: &[u8]) -> folio_core::domain::Post {
        self.service
            .create_post(input(title, jpeg(seed), None))
            .await
            .unwrap()
    }
}

/// A small JPEG-shaped blob; distinct seeds give distinct blob names.
fn jpeg(seed: &[u8]) -> ImageUpload {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(seed);
    ImageUpload::new(bytes, "jpg")
}

fn jpeg_of_len(len: usize) -> ImageUpload {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.resize(len, 0x42);
    ImageUpload::new(bytes, "jpeg")
}

fn input(title: &str, image: ImageUpload, category_id: Option<i64>) -> NewPostInput {
    NewPostInput {
        title: title.to_string(),
        content: "0123456789".to_string(),
        image,
        category_id,
    }
}

fn update(title: &str, image: Option<ImageUpload>) -> UpdatePostInput {
    UpdatePostInput {
        title: title.to_string(),
        content: "<p>Updated content</p>".to_string(),
        image,
        category_id: None,
    }
}

#[tokio::test]
async fn test_create_then_find_returns_supplied_fields() {
    let h = Harness::new();
    let category_id = h.category("News").await;
    assert_eq!(category_id, 1);

    let created = h
        .service
        .create_post(input("Hello World", jpeg(b"hello"), Some(category_id)))
        .await
        .unwrap();
    assert_eq!(created.title, "Hello World");

    let found = h.service.get_post(created.id).await.unwrap();
    assert_eq!(found, created);
    assert_eq!(found.content, "0123456789");
    assert_eq!(found.category_id, Some(1));
    assert!(h.assets.exists(&found.image).await.unwrap());

    let stored = h.assets.get(&found.image).await.unwrap();
    assert_eq!(stored, jpeg(b"hello").bytes);
}

#[tokio::test]
async fn test_short_title_is_rejected_without_side_effects() {
    let h = Harness::new();

    let err = h
        .service
        .create_post(input("Hi", jpeg(b"x"), None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation { field: "title", .. }));
    assert_eq!(h.assets.calls(), 0);
    let page = h.service.list_posts(PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_short_content_is_rejected() {
    let h = Harness::new();
    let mut bad = input("Hello World", jpeg(b"x"), None);
    bad.content = "too short".to_string();

    let err = h.service.create_post(bad).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation {
            field: "content",
            ..
        }
    ));
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let h = Harness::new();

    let err = h
        .service
        .create_post(input("Hello World", jpeg(b"x"), Some(42)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "Category",
            id: 42
        }
    ));
    assert_eq!(h.assets.calls(), 0);
}

#[tokio::test]
async fn test_image_size_boundary() {
    let h = Harness::new();

    h.service
        .create_post(input("Exactly max", jpeg_of_len(DEFAULT_MAX_IMAGE_BYTES), None))
        .await
        .unwrap();

    let err = h
        .service
        .create_post(input(
            "One byte over",
            jpeg_of_len(DEFAULT_MAX_IMAGE_BYTES + 1),
            None,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { field: "image", .. }));
}

#[tokio::test]
async fn test_configured_size_limit_applies() {
    let h = Harness::new();
    let service = h.service.clone().with_max_image_bytes(16);

    let err = service
        .create_post(input("Hello World", jpeg_of_len(17), None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { field: "image", .. }));
}

#[tokio::test]
async fn test_failed_blob_write_creates_no_record() {
    let h = Harness::new();
    h.assets.fail_put.store(true, Ordering::SeqCst);

    let err = h
        .service
        .create_post(input("Hello World", jpeg(b"x"), None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::StorageWrite(_)));
    let page = h.service.list_posts(PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_update_without_image_keeps_image_and_skips_store() {
    let h = Harness::new();
    let post = h.create("Hello World", b"original").await;
    h.assets.reset();

    let updated = h
        .service
        .update_post(post.id, update("Hello Again", None))
        .await
        .unwrap();

    assert_eq!(updated.title, "Hello Again");
    assert_eq!(updated.content, "<p>Updated content</p>");
    assert_eq!(updated.image, post.image);
    assert_eq!(updated.created_at, post.created_at);
    assert_eq!(h.assets.calls(), 0);
    assert!(h.assets.exists(&post.image).await.unwrap());
}

#[tokio::test]
async fn test_update_with_image_replaces_blob() {
    let h = Harness::new();
    let post = h.create("Hello World", b"original").await;

    let updated = h
        .service
        .update_post(post.id, update("Hello World", Some(jpeg(b"replacement"))))
        .await
        .unwrap();

    assert_ne!(updated.image, post.image);
    assert!(!h.assets.exists(&post.image).await.unwrap());
    assert!(h.assets.exists(&updated.image).await.unwrap());

    let found = h.service.get_post(post.id).await.unwrap();
    assert_eq!(found.image, updated.image);
}

#[tokio::test]
async fn test_update_with_identical_image_keeps_blob() {
    let h = Harness::new();
    let post = h.create("Hello World", b"same").await;

    let updated = h
        .service
        .update_post(post.id, update("Hello World", Some(jpeg(b"same"))))
        .await
        .unwrap();

    assert_eq!(updated.image, post.image);
    assert!(h.assets.exists(&updated.image).await.unwrap());
}

#[tokio::test]
async fn test_update_survives_failed_cleanup() {
    let h = Harness::new();
    let post = h.create("Hello World", b"original").await;
    h.assets.fail_delete.store(true, Ordering::SeqCst);

    let updated = h
        .service
        .update_post(post.id, update("Hello World", Some(jpeg(b"new"))))
        .await
        .unwrap();

    assert_eq!(h.assets.deletes.load(Ordering::SeqCst), 1);
    assert!(h.assets.exists(&updated.image).await.unwrap());
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let h = Harness::new();

    let err = h
        .service
        .update_post(999, update("Hello World", Some(jpeg(b"x"))))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "Post",
            id: 999
        }
    ));
    assert_eq!(h.assets.calls(), 0);
}

#[tokio::test]
async fn test_delete_removes_record_and_blob() {
    let h = Harness::new();
    let post = h.create("Hello World", b"doomed").await;

    h.service.delete_post(post.id).await.unwrap();

    assert!(!h.assets.exists(&post.image).await.unwrap());
    assert!(matches!(
        h.service.get_post(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        h.service.delete_post(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_with_missing_blob_succeeds() {
    let h = Harness::new();
    let post = h.create("Hello World", b"gone").await;
    h.assets.inner.delete(&post.image).await.unwrap();

    h.service.delete_post(post.id).await.unwrap();
    assert!(h.posts.find_by_id(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_survives_failed_cleanup() {
    let h = Harness::new();
    let post = h.create("Hello World", b"stuck").await;
    h.assets.fail_delete.store(true, Ordering::SeqCst);

    h.service.delete_post(post.id).await.unwrap();
    assert!(h.posts.find_by_id(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_shared_blob_outlives_one_owner() {
    let h = Harness::new();
    let first = h.create("First post", b"shared").await;
    let second = h.create("Second post", b"shared").await;
    assert_eq!(first.image, second.image);

    h.service.delete_post(first.id).await.unwrap();
    assert!(h.assets.exists(&second.image).await.unwrap());

    h.service.delete_post(second.id).await.unwrap();
    assert!(!h.assets.exists(&second.image).await.unwrap());
}

#[tokio::test]
async fn test_list_is_paginated_newest_first() {
    let h = Harness::new();
    for i in 1..=7u8 {
        h.create(&format!("Post number {i}"), &[i]).await;
    }

    let page = h.service.list_posts(PageRequest::new(1, 5)).await.unwrap();
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total, 7);
    assert_eq!(page.total_pages(), 2);
    let ids: Vec<i64> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, [7, 6, 5, 4, 3]);

    let rest = h.service.list_posts(PageRequest::new(2, 5)).await.unwrap();
    let ids: Vec<i64> = rest.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, [2, 1]);
}

#[tokio::test]
async fn test_huge_page_number_lists_nothing() {
    let h = Harness::new();
    h.create("Hello World", b"a").await;

    let page = h
        .service
        .list_posts(PageRequest::new(u64::MAX, 5))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 1);
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_overlong_title_is_rejected_before_upload() {
    let h = Harness::new();

    let err = h
        .service
        .create_post(input(&"t".repeat(300), jpeg(b"x"), None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation { field: "title", .. }));
    assert_eq!(h.assets.calls(), 0);
}

#[tokio::test]
async fn test_failed_insert_leaves_orphan_blob() {
    let (posts, assets, service) = service_with_failing_posts();
    posts.fail_create.store(true, Ordering::SeqCst);

    let err = service
        .create_post(input("Hello World", jpeg(b"orphan"), None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Persistence(_)));
    assert_eq!(assets.len().await, 1);
    let page = service.list_posts(PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_failed_record_delete_propagates_after_blob_release() {
    let (posts, assets, service) = service_with_failing_posts();
    let post = service
        .create_post(input("Hello World", jpeg(b"a"), None))
        .await
        .unwrap();
    posts.fail_delete.store(true, Ordering::SeqCst);

    let err = service.delete_post(post.id).await.unwrap_err();

    assert!(matches!(err, DomainError::Persistence(_)));
    assert!(!assets.exists(&post.image).await.unwrap());
    assert!(service.get_post(post.id).await.is_ok());
}

#[tokio::test]
async fn test_concurrent_updates_last_write_wins() {
    let h = Harness::new();
    let post = h.create("Hello World", b"race").await;

    let (a, b) = tokio::join!(
        h.service.update_post(post.id, update("Title from A", None)),
        h.service.update_post(post.id, update("Title from B", None)),
    );
    a.unwrap();
    b.unwrap();

    let found = h.service.get_post(post.id).await.unwrap();
    assert!(found.title == "Title from A" || found.title == "Title from B");
    assert_eq!(found.image, post.image);
}

#[tokio::test]
async fn test_detail_and_edit_views() {
    let h = Harness::new();
    let news = h.category("News").await;
    h.category("Art").await;

    let post = h
        .service
        .create_post(input("Hello World", jpeg(b"x"), Some(news)))
        .await
        .unwrap();

    let detail = h.service.get_post_detail(post.id).await.unwrap();
    assert_eq!(detail.category.map(|c| c.name), Some("News".to_string()));

    let edit = h.service.get_post_for_edit(post.id).await.unwrap();
    assert_eq!(edit.post.id, post.id);
    assert_eq!(edit.categories.len(), 2);
}

#[tokio::test]
async fn test_category_in_use_cannot_be_deleted() {
    let h = Harness::new();
    let categories = CategoryService::new(h.categories.clone(), h.posts.clone());
    let news = categories.create_category("  News  ").await.unwrap();
    assert_eq!(news.name, "News");

    let post = h
        .service
        .create_post(input("Hello World", jpeg(b"x"), Some(news.id)))
        .await
        .unwrap();

    let err = categories.delete_category(news.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    h.service.delete_post(post.id).await.unwrap();
    categories.delete_category(news.id).await.unwrap();
    assert!(matches!(
        categories.get_category(news.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_category_rename() {
    let h = Harness::new();
    let categories = CategoryService::new(h.categories.clone(), h.posts.clone());
    let news = categories.create_category("News").await.unwrap();

    let renamed = categories.update_category(news.id, "Updates").await.unwrap();
    assert_eq!(renamed.name, "Updates");
    assert!(matches!(
        categories.update_category(news.id, "").await,
        Err(DomainError::Validation { field: "name", .. })
    ));
    assert!(matches!(
        categories.update_category(999, "Other").await,
        Err(DomainError::NotFound { .. })
    ));
}
