use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - an article with an attached image and an optional category.
///
/// `content` is stored as opaque, possibly HTML-bearing text. Escaping it is the
/// job of whatever renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Name of the image blob in the asset store.
    pub image: String,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new [`Post`]. The repository assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image: String,
    pub category_id: Option<i64>,
}
