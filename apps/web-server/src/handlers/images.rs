//! Serves stored post images.

use actix_web::{HttpResponse, web};
use folio_core::domain::ImageKind;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /images/{name}
pub async fn show_image(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> AppResult<HttpResponse> {
    let name = name.into_inner();
    let kind = ImageKind::from_asset_name(&name)
        .ok_or_else(|| AppError::NotFound(format!("Image {} not found", name)))?;

    let bytes = state.assets.get(&name).await?;

    Ok(HttpResponse::Ok()
        .content_type(kind.content_type())
        .body(bytes))
}
