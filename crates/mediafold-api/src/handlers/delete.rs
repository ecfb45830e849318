//! Person purge endpoint. Answers in plain text.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::services::purge::PurgeService;
use crate::state::AppState;

pub const DELETE_PROMPT: &str = "please provide a name: /delete?name=<personName>";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    /// Person name, matched against every class
    #[serde(default)]
    pub name: Option<String>,
}

/// Remove every folder of a person, across all classes
#[utoipa::path(
    get,
    path = "/delete",
    tag = "maintenance",
    params(DeleteQuery),
    responses(
        (status = 200, description = "`success` or `no such name`", body = String, content_type = "text/plain"),
        (status = 400, description = "Name missing", body = String, content_type = "text/plain"),
        (status = 500, description = "`server error`", body = String, content_type = "text/plain")
    )
)]
#[tracing::instrument(skip(state), fields(name = ?query.name, operation = "delete_person"))]
pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeleteQuery>,
) -> Response {
    let name = query.name.unwrap_or_default();
    if name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, DELETE_PROMPT).into_response();
    }

    match PurgeService::new(&state).purge_person(&name).await {
        Ok(removed) if removed.is_empty() => (StatusCode::OK, "no such name").into_response(),
        Ok(removed) => {
            tracing::info!(folders = ?removed, "Person purged");
            (StatusCode::OK, "success").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Delete failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "server error").into_response()
        }
    }
}
