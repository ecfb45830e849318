//! Mediafold Storage Library
//!
//! This crate provides the storage abstraction, its local filesystem backend,
//! and the per-folder manifest store.
//!
//! # On-disk layout
//!
//! ```text
//! <uploads_dir>/
//!   <sanitize(className)>_<sanitize(personName)>/
//!     <timestamp>_<name><ext>   stored media
//!     index.json                { "items": [ ... ] }, pretty-printed
//! ```
//!
//! Stored files are served publicly at `/uploads/<folder>/<filename>`. Key and
//! URL generation is centralized in the `keys` module.

pub mod keys;
pub mod local;
pub mod manifest;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use manifest::{ManifestStore, MANIFEST_FILE_NAME};
pub use traits::{Storage, StorageError, StorageResult};
