//! Storage abstraction trait
//!
//! This module defines the Storage trait the upload, listing and delete
//! flows are written against.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid folder or file name: {0}")]
    InvalidKey(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Media is grouped into flat, top-level folders under one root. Folder and
/// file names passed in must be single path segments; implementations reject
/// anything that could escape the root.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Filesystem path of a folder. Does not touch the disk.
    fn folder_path(&self, folder: &str) -> StorageResult<PathBuf>;

    /// Create the folder if it does not exist yet (idempotent) and return its path
    async fn ensure_folder(&self, folder: &str) -> StorageResult<PathBuf>;

    /// Write one file into a folder and return its public URL
    async fn store_file(
        &self,
        folder: &str,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<String>;

    /// Names of every top-level folder
    async fn list_folders(&self) -> StorageResult<Vec<String>>;

    /// Recursively remove a folder and everything in it
    async fn remove_folder(&self, folder: &str) -> StorageResult<()>;

    /// Check that the storage root is reachable
    async fn health_check(&self) -> StorageResult<()>;
}
