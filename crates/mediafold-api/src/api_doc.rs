//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use mediafold_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mediafold API",
        version = "0.1.0",
        description = "Upload images and videos tagged with a class and a person, then browse or purge them."
    ),
    paths(
        handlers::upload::upload_media,
        handlers::items::list_items,
        handlers::items::get_item,
        handlers::delete::delete_person,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::Item,
            models::ItemType,
            handlers::upload::UploadResponse,
            handlers::items::ItemsResponse,
            handlers::items::ItemResponse,
            handlers::health::HealthResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "items", description = "Upload, list and fetch media items"),
        (name = "maintenance", description = "Manual cleanup endpoints"),
        (name = "config", description = "Service health checks")
    )
)]
pub struct ApiDoc;
