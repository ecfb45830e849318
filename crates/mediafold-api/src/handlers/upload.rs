use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use mediafold_core::{AppError, Item};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadService;
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub items: Vec<Item>,
}

/// Validation failures reach the client as they are; anything else is
/// logged and reported as a generic failure.
fn upload_failure(err: AppError) -> AppError {
    match err {
        AppError::InvalidInput(_) | AppError::PayloadTooLarge(_) => err,
        other => {
            tracing::error!(error = %other.detailed_message(), "Upload failed");
            AppError::Internal("upload failed".to_string())
        }
    }
}

/// Upload one or more files for a class/person pair
///
/// Every file is stored under `<class>_<person>/` and appended to that
/// folder's manifest. All items of one request share `uploadedAt`.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "items",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields: className, personName, description (optional), files (one or more)"),
    responses(
        (status = 200, description = "Files stored", body = UploadResponse),
        (status = 400, description = "Missing names, no files or unsupported type", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Upload failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload"))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let request = extract_upload_form(multipart).await?;

    let items = UploadService::new(&state)
        .upload(request)
        .await
        .map_err(upload_failure)?;

    Ok(Json(UploadResponse {
        success: true,
        items,
    }))
}
