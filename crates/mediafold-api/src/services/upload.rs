//! Upload flow: validate, store every file, then append the batch to the
//! folder manifest.
//!
//! Files are written before the manifest. If the manifest append fails the
//! files stay on disk unindexed; no partial success is reported.

use bytes::Bytes;
use chrono::Utc;
use mediafold_core::{checked_folder_name, AppError, Item, ItemType};
use mediafold_storage::keys;
use std::collections::HashSet;

use crate::constants::MAX_DESCRIPTION_CHARS;
use crate::error::storage_to_app_error;
use crate::state::AppState;

/// One file part of an upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// A parsed upload form. Names are kept raw; they are sanitized only to
/// derive the folder.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub class_name: String,
    pub person_name: String,
    pub description: String,
    pub files: Vec<UploadedFile>,
}

fn normalize_description(description: &str) -> String {
    description.trim().chars().take(MAX_DESCRIPTION_CHARS).collect()
}

/// Stored name for one file of a batch. Every file of a batch shares the
/// timestamp, so repeated names get a `-<n>` suffix.
fn unique_filename(uploaded_at: i64, original_name: &str, taken: &mut HashSet<String>) -> String {
    let mut n = 0;
    loop {
        let candidate = keys::numbered_filename(uploaded_at, original_name, n);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

pub struct UploadService<'a> {
    state: &'a AppState,
}

impl<'a> UploadService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Store the files of one request and record them. Every returned item
    /// shares a single `uploadedAt`.
    pub async fn upload(&self, request: UploadRequest) -> Result<Vec<Item>, AppError> {
        if request.class_name.trim().is_empty() || request.person_name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "className and personName are required".to_string(),
            ));
        }
        let folder = checked_folder_name(&request.class_name, &request.person_name)?;

        if request.files.is_empty() {
            return Err(AppError::InvalidInput(
                "at least one file is required".to_string(),
            ));
        }

        // Reject the whole batch before anything touches the disk.
        let mut typed = Vec::with_capacity(request.files.len());
        for file in request.files {
            let item_type = ItemType::from_mime(&file.content_type).ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "unsupported file type '{}' for '{}': only images and videos are accepted",
                    file.content_type, file.original_name
                ))
            })?;
            typed.push((item_type, file));
        }

        let storage = &self.state.storage;
        let folder_path = storage
            .ensure_folder(&folder)
            .await
            .map_err(storage_to_app_error)?;

        let uploaded_at = Utc::now().timestamp_millis();
        let description = normalize_description(&request.description);

        let mut items = Vec::with_capacity(typed.len());
        let mut taken = HashSet::with_capacity(typed.len());
        for (item_type, file) in typed {
            let filename = unique_filename(uploaded_at, &file.original_name, &mut taken);
            let size_bytes = file.data.len();
            let url = storage
                .store_file(&folder, &filename, &file.content_type, file.data)
                .await
                .map_err(storage_to_app_error)?;

            tracing::debug!(
                folder = %folder,
                filename = %filename,
                size_bytes,
                "Stored upload"
            );

            items.push(Item {
                item_type: Some(item_type),
                mime_type: Some(file.content_type),
                id: Some(keys::item_id(&folder, &filename)),
                filename: Some(filename),
                url: Some(url),
                uploaded_at: Some(uploaded_at),
                description: description.clone(),
                class_name: request.class_name.clone(),
                person_name: request.person_name.clone(),
                folder_name: None,
            });
        }

        let total = self
            .state
            .manifests
            .append(&folder_path, &items)
            .await
            .map_err(storage_to_app_error)?;

        tracing::info!(
            folder = %folder,
            files = items.len(),
            manifest_items = total,
            uploaded_at,
            "Upload recorded"
        );

        Ok(items)
    }
}
