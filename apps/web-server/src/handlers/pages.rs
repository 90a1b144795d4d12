//! HTML page handlers.

use actix_web::{
    HttpResponse,
    http::{StatusCode, header},
    web,
};

use folio_core::DomainError;
use folio_core::services::UpdatePostInput;
use folio_shared::dto::{PageQuery, PostForm};

use super::mapping::page_request;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

/// GET /posts
pub async fn post_index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = page_request(query.into_inner(), state.posts_per_page);
    let posts = state.posts.list_posts(page).await?;
    let categories = state.categories.list_categories().await?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(views::render_post_index(&posts, &categories)))
}

/// GET /posts/{id}
pub async fn post_detail(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let detail = state.posts.get_post_detail(id.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(views::render_post_detail(
            &detail.post,
            detail.category.as_ref(),
        )))
}

/// GET /posts/{id}/edit
pub async fn post_edit(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let view = state.posts.get_post_for_edit(id.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(views::render_post_edit(&view.post, &view.categories, None)))
}

/// POST /posts/{id} - the edit form. The image is kept; images change through the JSON API.
pub async fn post_update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let form = form.into_inner();

    let category_id = match form.category_id.trim() {
        "" => None,
        raw => Some(
            raw.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("invalid category id: {raw}")))?,
        ),
    };

    let input = UpdatePostInput {
        title: form.title,
        content: form.content,
        image: None,
        category_id,
    };

    match state.posts.update_post(id, input.clone()).await {
        Ok(_) => Ok(see_other(&format!("/posts/{id}"))),
        Err(DomainError::Validation { message, .. }) => {
            // Re-render with what was submitted so nothing typed is lost.
            let mut view = state.posts.get_post_for_edit(id).await?;
            view.post.title = input.title;
            view.post.content = input.content;
            view.post.category_id = input.category_id;

            Ok(HttpResponse::build(StatusCode::UNPROCESSABLE_ENTITY)
                .content_type(header::ContentType::html())
                .body(views::render_post_edit(
                    &view.post,
                    &view.categories,
                    Some(&message),
                )))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /posts/{id}/delete
pub async fn post_delete(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.posts.delete_post(id.into_inner()).await?;

    Ok(see_other("/posts"))
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
