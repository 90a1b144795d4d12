//! HTTP handlers and route configuration.

mod categories;
mod health;
mod images;
pub(crate) mod mapping;
mod pages;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// JSON extractor settings: body limit plus problem-details errors.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Query extractor settings: problem-details errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Form extractor settings: problem-details errors.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Path extractor settings: a non-numeric id is simply not found.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::NotFound(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::show_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/edit", web::get().to(posts::edit_post)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list_categories))
                    .route("", web::post().to(categories::create_category))
                    .route("/{id}", web::get().to(categories::show_category))
                    .route("/{id}", web::put().to(categories::update_category))
                    .route("/{id}", web::delete().to(categories::delete_category)),
            ),
    )
    // HTML pages
    .route("/posts", web::get().to(pages::post_index))
    .route("/posts/{id}", web::get().to(pages::post_detail))
    .route("/posts/{id}", web::post().to(pages::post_update))
    .route("/posts/{id}/edit", web::get().to(pages::post_edit))
    .route("/posts/{id}/delete", web::post().to(pages::post_delete))
    .route("/images/{name}", web::get().to(images::show_image));
}
