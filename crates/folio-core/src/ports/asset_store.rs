use async_trait::async_trait;

use crate::error::AssetError;

/// Asset store - a flat namespace of binary blobs ("post images").
///
/// Names are generated by the store from the blob content, see
/// [`asset_name`](crate::domain::asset_name).
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Write a blob and return the name it is stored under.
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<String, AssetError>;

    /// Remove a blob. Removing a name that does not exist succeeds.
    async fn delete(&self, name: &str) -> Result<(), AssetError>;

    async fn exists(&self, name: &str) -> Result<bool, AssetError>;

    /// Read a blob back. Fails with [`AssetError::NotFound`] if it does not exist.
    async fn get(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}
