//! Domain → DTO conversions.

use folio_core::domain::{Category, Page, PageRequest, Post};
use folio_shared::dto::{CategoryResponse, PageQuery, PageResponse, PostResponse};

pub fn image_url(image: &str) -> String {
    format!("/images/{}", image)
}

pub fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        image_url: image_url(&post.image),
        title: post.title,
        content: post.content,
        image: post.image,
        category_id: post.category_id,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

pub fn category_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name,
        created_at: category.created_at.to_rfc3339(),
        updated_at: category.updated_at.to_rfc3339(),
    }
}

pub fn page_response<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageResponse<U> {
    let total_pages = page.total_pages();
    let page = page.map(f);
    PageResponse {
        items: page.items,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages,
    }
}

pub fn page_request(query: PageQuery, default_per_page: u64) -> PageRequest {
    PageRequest::new(
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(default_per_page),
    )
}
