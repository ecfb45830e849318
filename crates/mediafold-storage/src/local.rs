use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root uploads directory (e.g., "./uploads"); created if missing
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create uploads directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Join a single name under `parent`, refusing anything that is not a
    /// plain path segment.
    fn segment_path(parent: &Path, segment: &str) -> StorageResult<PathBuf> {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains(['/', '\\', '\0'])
        {
            return Err(StorageError::InvalidKey(format!(
                "'{}' is not a single path segment",
                segment
            )));
        }
        Ok(parent.join(segment))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    fn folder_path(&self, folder: &str) -> StorageResult<PathBuf> {
        Self::segment_path(&self.base_path, folder)
    }

    async fn ensure_folder(&self, folder: &str) -> StorageResult<PathBuf> {
        let path = self.folder_path(folder)?;
        fs::create_dir_all(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create folder {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(path)
    }

    async fn store_file(
        &self,
        folder: &str,
        filename: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        let folder_path = self.folder_path(folder)?;
        let path = Self::segment_path(&folder_path, filename)?;
        let size = data.len();
        let start = std::time::Instant::now();

        // Never replace an existing file; a name clash is an upload failure.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            folder = %folder,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(keys::public_url(folder, filename))
    }

    async fn list_folders(&self) -> StorageResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.base_path).await?;
        let mut folders = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let is_dir = match entry.file_type().await {
                Ok(file_type) => file_type.is_dir(),
                Err(e) => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "Skipping entry with unreadable file type"
                    );
                    continue;
                }
            };
            if !is_dir {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => folders.push(name),
                Err(raw) => {
                    tracing::warn!(name = ?raw, "Skipping folder with non UTF-8 name");
                }
            }
        }

        folders.sort();
        Ok(folders)
    }

    async fn remove_folder(&self, folder: &str) -> StorageResult<()> {
        let path = self.folder_path(folder)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(folder.to_string()));
        }

        fs::remove_dir_all(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!(
                "Failed to delete folder {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            folder = %folder,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage folder removed"
        );

        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        let meta = fs::metadata(&self.base_path).await?;
        if !meta.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "{} is not a directory",
                self.base_path.display()
            )));
        }
        Ok(())
    }
}
