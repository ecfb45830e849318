//! Per-folder `index.json` manifest store.
//!
//! Every folder carries one manifest listing its items in upload order. The
//! store is stateless apart from optional per-folder locks: each call reads
//! or rewrites the file on disk.
//!
//! Without locking, an append is a plain read-modify-write. Two concurrent
//! appends to the same folder can both read the same prior content, and the
//! later write wins, dropping the other append. Enabling locking serializes
//! appends per folder and writes through a temporary file plus rename.

use mediafold_core::{CorruptManifestPolicy, Item, Manifest};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::traits::{StorageError, StorageResult};

pub const MANIFEST_FILE_NAME: &str = "index.json";

#[derive(Default)]
struct FolderLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl FolderLocks {
    async fn acquire(&self, folder_path: &Path) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(folder_path.to_path_buf())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drop the entry for a folder unless an append still holds or waits on it.
    async fn release(&self, folder_path: &Path) {
        let mut locks = self.locks.lock().await;
        if locks
            .get(folder_path)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(folder_path);
        }
    }

    async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[derive(Clone)]
pub struct ManifestStore {
    policy: CorruptManifestPolicy,
    locks: Option<Arc<FolderLocks>>,
}

impl ManifestStore {
    /// `locking` turns on per-folder serialization and atomic writes.
    pub fn new(policy: CorruptManifestPolicy, locking: bool) -> Self {
        Self {
            policy,
            locks: locking.then(|| Arc::new(FolderLocks::default())),
        }
    }

    pub fn manifest_path(folder_path: &Path) -> PathBuf {
        folder_path.join(MANIFEST_FILE_NAME)
    }

    /// Stop tracking a folder that no longer exists. Without this the lock
    /// map grows by one entry per folder ever appended to.
    pub async fn forget(&self, folder_path: &Path) {
        if let Some(locks) = &self.locks {
            locks.release(folder_path).await;
        }
    }

    /// Number of folders with a tracked lock; zero when locking is off.
    pub async fn tracked_folders(&self) -> usize {
        match &self.locks {
            Some(locks) => locks.len().await,
            None => 0,
        }
    }

    pub fn policy(&self) -> CorruptManifestPolicy {
        self.policy
    }

    /// Read a folder's manifest. A missing file is an empty manifest; an
    /// unreadable or unparsable one is handled per the corrupt policy.
    pub async fn read(&self, folder_path: &Path) -> StorageResult<Manifest> {
        let path = Self::manifest_path(folder_path);

        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Manifest::default());
            }
            Err(e) => return self.on_corrupt(&path, format!("read failed: {}", e)),
        };

        match serde_json::from_slice::<Manifest>(&raw) {
            Ok(manifest) => Ok(manifest),
            Err(e) => self.on_corrupt(&path, format!("parse failed: {}", e)),
        }
    }

    fn on_corrupt(&self, path: &Path, reason: String) -> StorageResult<Manifest> {
        match self.policy {
            CorruptManifestPolicy::ReturnEmpty => {
                tracing::warn!(
                    path = %path.display(),
                    reason = %reason,
                    "Unreadable manifest treated as empty"
                );
                Ok(Manifest::default())
            }
            CorruptManifestPolicy::Fail => Err(StorageError::Manifest(format!(
                "{}: {}",
                path.display(),
                reason
            ))),
        }
    }

    /// Overwrite a folder's manifest with pretty-printed JSON.
    pub async fn write(&self, folder_path: &Path, manifest: &Manifest) -> StorageResult<()> {
        let path = Self::manifest_path(folder_path);
        let body = serde_json::to_vec_pretty(manifest)
            .map_err(|e| StorageError::Manifest(format!("serialize failed: {}", e)))?;

        if self.locks.is_some() {
            let tmp = folder_path.join(format!(
                ".{}.{}.tmp",
                MANIFEST_FILE_NAME,
                uuid::Uuid::new_v4()
            ));
            fs::write(&tmp, &body).await?;
            if let Err(e) = fs::rename(&tmp, &path).await {
                let _ = fs::remove_file(&tmp).await;
                return Err(e.into());
            }
        } else {
            fs::write(&path, &body).await?;
        }

        tracing::debug!(
            path = %path.display(),
            items = manifest.items.len(),
            "Manifest written"
        );
        Ok(())
    }

    /// Append items to a folder's manifest, preserving their order.
    /// Returns the new item count.
    pub async fn append(&self, folder_path: &Path, items: &[Item]) -> StorageResult<usize> {
        let _guard = match &self.locks {
            Some(locks) => Some(locks.acquire(folder_path).await),
            None => None,
        };

        let mut manifest = self.read(folder_path).await?;
        manifest.items.extend_from_slice(items);
        self.write(folder_path, &manifest).await?;
        Ok(manifest.items.len())
    }
}
