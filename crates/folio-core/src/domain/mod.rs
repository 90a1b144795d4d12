//! Domain entities - the core business objects.

mod category;
mod image;
mod page;
mod post;
mod validation;

pub use category::{Category, NewCategory};
pub use image::{
    ACCEPTED_EXTENSIONS, DEFAULT_MAX_IMAGE_BYTES, ImageKind, ImageUpload, asset_name,
    is_valid_asset_name,
};
pub use page::{Page, PageRequest};
pub use post::{NewPost, Post};
pub use validation::{not_blank, validate_fields};
