//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// An uploaded image, base64-encoded.
#[derive(Clone, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Standard base64 of the file contents.
    pub data: String,
    /// Original file extension, e.g. `png`.
    pub extension: String,
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("data_len", &self.data.len())
            .field("extension", &self.extension)
            .finish()
    }
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub image: ImagePayload,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Request to update a post. Omitting `image` keeps the current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<ImagePayload>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Request to create or rename a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

/// URL-encoded body of the HTML edit form. An empty `category_id` clears the category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_id: String,
}

/// Query string for paginated listings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image: String,
    /// Path the image is served from.
    pub image_url: String,
    pub category_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A post with its category, if it has one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub category: Option<CategoryResponse>,
}

/// A post with the categories it can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEditResponse {
    pub post: PostResponse,
    pub categories: Vec<CategoryResponse>,
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}
