//! Mediafold Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! folder naming rules shared by the storage and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod naming;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Item, ItemType, Manifest};
pub use naming::{checked_folder_name, folder_name, person_from_folder_name, sanitize_segment};
pub use storage_types::CorruptManifestPolicy;
