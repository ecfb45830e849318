//! Storage setup and initialization

use anyhow::{Context, Result};
use mediafold_core::Config;
use mediafold_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create the uploads root if needed and wrap it in the storage abstraction.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(path = %config.uploads_dir.display(), "Initializing local storage...");
    let storage = LocalStorage::new(&config.uploads_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to prepare uploads directory {}",
                config.uploads_dir.display()
            )
        })?;
    tracing::info!("Storage initialized successfully");
    Ok(Arc::new(storage))
}
