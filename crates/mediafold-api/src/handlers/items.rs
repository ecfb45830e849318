use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use mediafold_core::Item;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::catalog::CatalogService;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub item: Item,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    /// `<folderName>/<filename>`
    #[serde(default)]
    pub id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/items",
    tag = "items",
    responses(
        (status = 200, description = "All items, newest first", body = ItemsResponse),
        (status = 500, description = "Uploads directory could not be scanned", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_items"))]
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ItemsResponse>, HttpAppError> {
    let items = CatalogService::new(&state).list_all().await?;
    Ok(Json(ItemsResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/item",
    tag = "items",
    params(ItemQuery),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 404, description = "No such item", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(id = ?query.id, operation = "get_item"))]
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<ItemResponse>, HttpAppError> {
    let id = query.id.unwrap_or_default();
    let item = CatalogService::new(&state).get_by_id(&id).await?;
    Ok(Json(ItemResponse { item }))
}
