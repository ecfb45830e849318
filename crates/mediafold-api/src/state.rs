//! Application state shared by all handlers.

use mediafold_core::Config;
use mediafold_storage::{ManifestStore, Storage};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub manifests: ManifestStore,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let manifests =
            ManifestStore::new(config.corrupt_manifest_policy, config.manifest_locking);
        Self {
            config,
            storage,
            manifests,
        }
    }
}
