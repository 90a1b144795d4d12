//! Filesystem asset store. Blobs live as flat files in one directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use folio_core::domain::{asset_name, is_valid_asset_name};
use folio_core::error::AssetError;
use folio_core::ports::AssetStore;

pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    /// Open the store, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| AssetError::Write(format!("{}: {e}", root.display())))?;

        tracing::info!(root = %root.display(), "Local asset store ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, AssetError> {
        if !is_valid_asset_name(name) {
            return Err(AssetError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<String, AssetError> {
        let name = asset_name(bytes, extension);
        let path = self.path_for(&name)?;

        // Same name means same content.
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(image = %name, "Asset already stored");
            return Ok(name);
        }

        // Write to a temporary file, then rename, so readers never see a partial blob.
        let tmp = self
            .root
            .join(format!(".{name}.{}.tmp", uuid::Uuid::new_v4()));
        if let Err(e) = tokio::fs::write(&tmp, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(AssetError::Write(e.to_string()));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(AssetError::Write(e.to_string()));
        }

        tracing::debug!(image = %name, bytes = bytes.len(), "Asset stored");
        Ok(name)
    }

    async fn delete(&self, name: &str) -> Result<(), AssetError> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(image = %name, "Asset deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssetError::Delete {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn exists(&self, name: &str) -> Result<bool, AssetError> {
        let path = self.path_for(name)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| AssetError::Write(e.to_string()))
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AssetError::NotFound(name.to_string())),
            Err(e) => Err(AssetError::Write(e.to_string())),
        }
    }
}
