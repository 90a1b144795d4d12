//! In-memory asset store - used when no asset directory is configured, and in tests.
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use folio_core::domain::{asset_name, is_valid_asset_name};
use folio_core::error::AssetError;
use folio_core::ports::AssetStore;

pub struct InMemoryAssetStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

impl Default for InMemoryAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<String, AssetError> {
        let name = asset_name(bytes, extension);
        if !is_valid_asset_name(&name) {
            return Err(AssetError::InvalidName(name));
        }

        self.blobs
            .write()
            .await
            .entry(name.clone())
            .or_insert_with(|| bytes.to_vec());
        Ok(name)
    }

    async fn delete(&self, name: &str) -> Result<(), AssetError> {
        self.blobs.write().await.remove(name);
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool, AssetError> {
        Ok(self.blobs.read().await.contains_key(name))
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.blobs
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}
