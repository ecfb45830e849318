//! Multipart extraction for the upload endpoint

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use mediafold_core::AppError;

use crate::constants::{FIELD_CLASS_NAME, FIELD_DESCRIPTION, FIELD_FILES, FIELD_PERSON_NAME};
use crate::error::upload_too_large;
use crate::services::upload::{UploadRequest, UploadedFile};

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        upload_too_large()
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

fn is_file_field(name: &str) -> bool {
    name == FIELD_FILES || name == "files[]" || name == "file"
}

/// Read the whole upload form: the text fields plus every file part, in
/// arrival order. Text fields may come before or after the files.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadRequest, AppError> {
    let mut request = UploadRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field.file_name().is_some() || is_file_field(&field_name) {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await.map_err(multipart_error)?;

            request.files.push(UploadedFile {
                original_name,
                content_type,
                data,
            });
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match field_name.as_str() {
            FIELD_CLASS_NAME => request.class_name = value,
            FIELD_PERSON_NAME => request.person_name = value,
            FIELD_DESCRIPTION => request.description = value,
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(request)
}
