//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod asset_store;
mod repository;

pub use asset_store::AssetStore;
pub use repository::{BaseRepository, CategoryRepository, PostRepository};
