//! Post handlers - JSON API over the post lifecycle.

use actix_web::{HttpResponse, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use folio_core::domain::ImageUpload;
use folio_core::services::{NewPostInput, UpdatePostInput};
use folio_shared::ApiResponse;
use folio_shared::dto::{
    CreatePostRequest, ImagePayload, PageQuery, PostDetailResponse, PostEditResponse,
    UpdatePostRequest,
};

use super::mapping::{category_response, page_request, page_response, post_response};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn decode_image(payload: ImagePayload) -> AppResult<ImageUpload> {
    let bytes = STANDARD
        .decode(payload.data.trim())
        .map_err(|e| AppError::BadRequest(format!("image data is not valid base64: {}", e)))?;
    Ok(ImageUpload::new(bytes, payload.extension))
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = page_request(query.into_inner(), state.posts_per_page);
    let posts = state.posts.list_posts(page).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(posts, post_response))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = NewPostInput {
        title: req.title,
        content: req.content,
        image: decode_image(req.image)?,
        category_id: req.category_id,
    };

    let post = state.posts.create_post(input).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        post_response(post),
        "Created successfully!",
    )))
}

/// GET /api/posts/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let detail = state.posts.get_post_detail(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostDetailResponse {
        post: post_response(detail.post),
        category: detail.category.map(category_response),
    })))
}

/// GET /api/posts/{id}/edit
pub async fn edit_post(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let view = state.posts.get_post_for_edit(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostEditResponse {
        post: post_response(view.post),
        categories: view.categories.into_iter().map(category_response).collect(),
    })))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = UpdatePostInput {
        title: req.title,
        content: req.content,
        image: req.image.map(decode_image).transpose()?,
        category_id: req.category_id,
    };

    let post = state.posts.update_post(id.into_inner(), input).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post_response(post),
        "Updated successfully!",
    )))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.posts.delete_post(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
