//! Storage doubles.

use async_trait::async_trait;
use bytes::Bytes;
use mediafold_storage::{LocalStorage, Storage, StorageError, StorageResult};
use std::path::PathBuf;

/// Local storage whose file writes always fail.
pub struct FailingWrites(pub LocalStorage);

#[async_trait]
impl Storage for FailingWrites {
    fn folder_path(&self, folder: &str) -> StorageResult<PathBuf> {
        self.0.folder_path(folder)
    }

    async fn ensure_folder(&self, folder: &str) -> StorageResult<PathBuf> {
        self.0.ensure_folder(folder).await
    }

    async fn store_file(
        &self,
        _folder: &str,
        filename: &str,
        _content_type: &str,
        _data: Bytes,
    ) -> StorageResult<String> {
        Err(StorageError::UploadFailed(format!(
            "disk full while writing {}",
            filename
        )))
    }

    async fn list_folders(&self) -> StorageResult<Vec<String>> {
        self.0.list_folders().await
    }

    async fn remove_folder(&self, folder: &str) -> StorageResult<()> {
        self.0.remove_folder(folder).await
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.0.health_check().await
    }
}
