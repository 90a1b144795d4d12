//! Post lifecycle - keeps post records and their image blobs in step.
//!
//! Every mutation is a short linear sequence of at most two external effects:
//!
//! - create: write blob, then insert record. A failed insert leaves an orphan blob.
//! - update with image: write new blob, update record, then release the old blob.
//! - delete: release blob, then delete record. A failed record delete leaves a
//!   record whose blob is already gone.
//!
//! Blob releases are best-effort: failures are logged and never surface to the caller.
//! Because blob names are content hashes, a blob is only released when no other
//! post still refers to it.

use std::sync::Arc;

use serde::Serialize;
use validator::Validate;

use crate::domain::{
    Category, DEFAULT_MAX_IMAGE_BYTES, ImageUpload, NewPost, Page, PageRequest, Post, not_blank,
    validate_fields,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{AssetStore, CategoryRepository, PostRepository};

/// Text fields checked before any side effect, in reporting order.
const POST_FIELDS: &[&str] = &["title", "content"];

/// Input for [`PostService::create_post`].
#[derive(Debug, Clone, Validate)]
pub struct NewPostInput {
    #[validate(
        custom(function = "not_blank"),
        length(min = 5, max = 255, message = "The title must be between 5 and 255 characters.")
    )]
    pub title: String,
    #[validate(
        custom(function = "not_blank"),
        length(min = 10, message = "The content must be at least 10 characters.")
    )]
    pub content: String,
    pub image: ImageUpload,
    pub category_id: Option<i64>,
}

/// Input for [`PostService::update_post`]. `image: None` keeps the current image.
#[derive(Debug, Clone, Validate)]
pub struct UpdatePostInput {
    #[validate(
        custom(function = "not_blank"),
        length(min = 5, max = 255, message = "The title must be between 5 and 255 characters.")
    )]
    pub title: String,
    #[validate(
        custom(function = "not_blank"),
        length(min = 10, message = "The content must be at least 10 characters.")
    )]
    pub content: String,
    pub image: Option<ImageUpload>,
    pub category_id: Option<i64>,
}

/// A post together with its category, for the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub category: Option<Category>,
}

/// A post together with every category it could be moved to, for the edit form.
#[derive(Debug, Clone, Serialize)]
pub struct PostEditView {
    pub post: Post,
    pub categories: Vec<Category>,
}

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    assets: Arc<dyn AssetStore>,
    max_image_bytes: usize,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        assets: Arc<dyn AssetStore>,
    ) -> Self {
        Self {
            posts,
            categories,
            assets,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    pub async fn list_posts(&self, page: PageRequest) -> Result<Page<Post>, DomainError> {
        let page = PageRequest::new(page.page, page.per_page);
        Ok(self.posts.list_page(page).await?)
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    pub async fn get_post_detail(&self, id: i64) -> Result<PostDetail, DomainError> {
        let post = self.get_post(id).await?;
        let category = match post.category_id {
            Some(category_id) => self.categories.find_by_id(category_id).await?,
            None => None,
        };
        Ok(PostDetail { post, category })
    }

    pub async fn get_post_for_edit(&self, id: i64) -> Result<PostEditView, DomainError> {
        let post = self.get_post(id).await?;
        let categories = self.categories.list_all().await?;
        Ok(PostEditView { post, categories })
    }

    pub async fn create_post(&self, input: NewPostInput) -> Result<Post, DomainError> {
        validate_fields(&input, POST_FIELDS)?;
        input.image.validate(self.max_image_bytes)?;
        self.ensure_category_exists(input.category_id).await?;

        let image = self.store_image(&input.image).await?;

        let post = self
            .posts
            .create(NewPost {
                title: input.title,
                content: input.content,
                image: image.clone(),
                category_id: input.category_id,
            })
            .await
            .map_err(|e| {
                tracing::warn!(image = %image, error = %e, "Post insert failed after image upload, image may be orphaned");
                DomainError::from(e)
            })?;

        tracing::info!(post_id = post.id, image = %post.image, "Post created");
        Ok(post)
    }

    pub async fn update_post(&self, id: i64, input: UpdatePostInput) -> Result<Post, DomainError> {
        validate_fields(&input, POST_FIELDS)?;
        if let Some(image) = &input.image {
            image.validate(self.max_image_bytes)?;
        }

        let mut post = self.get_post(id).await?;
        self.ensure_category_exists(input.category_id).await?;

        let replaced = match &input.image {
            Some(upload) => {
                let name = self.store_image(upload).await?;
                Some(std::mem::replace(&mut post.image, name))
            }
            None => None,
        };

        post.title = input.title;
        post.content = input.content;
        post.category_id = input.category_id;

        let new_image = post.image.clone();
        let updated = self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Post", id),
            other => {
                if replaced.is_some() {
                    tracing::warn!(post_id = id, image = %new_image, error = %other, "Post update failed after image upload, image may be orphaned");
                }
                other.into()
            }
        })?;

        if let Some(old) = replaced {
            if old != updated.image {
                self.release_image(&old).await;
            }
        }

        tracing::info!(post_id = updated.id, image = %updated.image, "Post updated");
        Ok(updated)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        let post = self.get_post(id).await?;

        // This post still counts as a reference until its record is gone.
        self.release_image_shared_by(&post.image, 1).await;

        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Post", id),
            other => other.into(),
        })?;

        tracing::info!(post_id = id, image = %post.image, "Post deleted");
        Ok(())
    }

    async fn ensure_category_exists(&self, category_id: Option<i64>) -> Result<(), DomainError> {
        let Some(category_id) = category_id else {
            return Ok(());
        };
        match self.categories.find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Category", category_id)),
        }
    }

    async fn store_image(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        self.assets
            .put(&upload.bytes, &upload.normalized_extension())
            .await
            .map_err(DomainError::from)
    }

    /// Release a blob that no record should reference any more.
    async fn release_image(&self, name: &str) {
        self.release_image_shared_by(name, 0).await;
    }

    /// Delete `name` unless more than `own_refs` posts still point at it.
    ///
    /// Count and delete are separate steps: a post created with the same bytes in
    /// between ends up referencing a deleted blob.
    async fn release_image_shared_by(&self, name: &str, own_refs: u64) {
        match self.posts.count_by_image(name).await {
            Ok(refs) if refs > own_refs => {
                tracing::debug!(image = %name, refs, "Image still referenced, keeping blob");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(image = %name, error = %e, "Could not count image references, keeping blob");
                return;
            }
        }

        if let Err(e) = self.assets.delete(name).await {
            tracing::warn!(image = %name, error = %e, "Failed to delete image blob");
        }
    }
}
