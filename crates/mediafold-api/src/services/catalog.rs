//! Read side of the catalog: every item across every folder, or one item
//! by id.

use mediafold_core::{AppError, Item};
use mediafold_storage::keys;

use crate::error::storage_to_app_error;
use crate::state::AppState;

pub struct CatalogService<'a> {
    state: &'a AppState,
}

impl<'a> CatalogService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// All items, newest first. Items with equal timestamps keep folder
    /// order then manifest order. A folder whose manifest cannot be read is
    /// skipped.
    pub async fn list_all(&self) -> Result<Vec<Item>, AppError> {
        let folders = self.state.storage.list_folders().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to scan uploads root");
            AppError::Internal("failed to list items".to_string())
        })?;

        let mut items = Vec::new();
        for folder in &folders {
            let folder_path = match self.state.storage.folder_path(folder) {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(folder = %folder, error = %e, "Skipping folder");
                    continue;
                }
            };
            let manifest = match self.state.manifests.read(&folder_path).await {
                Ok(manifest) => manifest,
                Err(e) => {
                    tracing::warn!(folder = %folder, error = %e, "Skipping folder with unreadable manifest");
                    continue;
                }
            };
            items.extend(manifest.items.into_iter().map(|mut item| {
                keys::backfill_item(&mut item, folder);
                item
            }));
        }

        // sort_by_key is stable
        items.sort_by_key(|item| std::cmp::Reverse(item.sort_key()));

        tracing::debug!(folders = folders.len(), items = items.len(), "Listed items");
        Ok(items)
    }

    /// Look up one item by its `<folderName>/<filename>` id.
    pub async fn get_by_id(&self, id: &str) -> Result<Item, AppError> {
        if id.is_empty() {
            return Err(AppError::InvalidInput("id required".to_string()));
        }

        let (folder, filename) = keys::parse_item_id(id)
            .ok_or_else(|| AppError::InvalidInput("invalid id".to_string()))?;

        let folder_path = self
            .state
            .storage
            .folder_path(folder)
            .map_err(|_| AppError::InvalidInput("invalid id".to_string()))?;

        let manifest = self
            .state
            .manifests
            .read(&folder_path)
            .await
            .map_err(storage_to_app_error)?;

        let mut item = manifest
            .items
            .into_iter()
            .find(|item| item.matches(id, filename))
            .ok_or_else(|| AppError::NotFound("not found".to_string()))?;

        keys::backfill_item(&mut item, folder);
        Ok(item)
    }
}
