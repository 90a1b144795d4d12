//! Application services - the operations exposed to the presentation layer.

mod category_service;
mod post_service;

pub use category_service::CategoryService;
pub use post_service::{NewPostInput, PostDetail, PostEditView, PostService, UpdatePostInput};
