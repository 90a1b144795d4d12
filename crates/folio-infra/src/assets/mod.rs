//! Image asset stores - a directory on disk, or memory.

mod local;
mod memory;

pub use local::LocalAssetStore;
pub use memory::InMemoryAssetStore;
