//! Category handlers.

use actix_web::{HttpResponse, web};

use folio_shared::ApiResponse;
use folio_shared::dto::{CategoryRequest, PageQuery};

use super::mapping::{category_response, page_request, page_response};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
///
/// Paginated when `page` is given, otherwise every category.
pub async fn list_categories(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    if query.page.is_some() {
        let page = page_request(query, state.posts_per_page);
        let categories = state.categories.list_categories_page(page).await?;
        return Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(
            categories,
            category_response,
        ))));
    }

    let categories: Vec<_> = state
        .categories
        .list_categories()
        .await?
        .into_iter()
        .map(category_response)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// POST /api/categories
pub async fn create_category(
    state: web::Data<AppState>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state.categories.create_category(&body.name).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        category_response(category),
        "Created successfully!",
    )))
}

/// GET /api/categories/{id}
pub async fn show_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let category = state.categories.get_category(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(category_response(category))))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .categories
        .update_category(id.into_inner(), &body.name)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        category_response(category),
        "Updated successfully!",
    )))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.categories.delete_category(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
