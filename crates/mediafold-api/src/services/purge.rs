//! Remove every folder belonging to a person, across all classes.

use mediafold_core::{person_from_folder_name, sanitize_segment, AppError};

use crate::state::AppState;

pub struct PurgeService<'a> {
    state: &'a AppState,
}

impl<'a> PurgeService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Delete the folders whose person segment equals the sanitized `name`.
    /// Returns the folders actually removed. A removal failure is logged and
    /// the remaining folders are still attempted.
    ///
    /// The person segment is whatever follows the last `_`, so a class whose
    /// sanitized name contains `_` can shift the match.
    pub async fn purge_person(&self, name: &str) -> Result<Vec<String>, AppError> {
        let target = sanitize_segment(name);
        if target.is_empty() {
            return Ok(Vec::new());
        }

        let folders = self.state.storage.list_folders().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to scan uploads root");
            AppError::Internal("server error".to_string())
        })?;

        let mut removed = Vec::new();
        for folder in folders {
            if person_from_folder_name(&folder) != target {
                continue;
            }
            match self.state.storage.remove_folder(&folder).await {
                Ok(()) => {
                    tracing::info!(folder = %folder, "Removed folder");
                    if let Ok(path) = self.state.storage.folder_path(&folder) {
                        self.state.manifests.forget(&path).await;
                    }
                    removed.push(folder);
                }
                Err(e) => {
                    tracing::warn!(folder = %folder, error = %e, "Failed to remove folder");
                }
            }
        }

        Ok(removed)
    }
}
