//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::constants::API_PREFIX;
use crate::error::json_payload_too_large;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use mediafold_core::Config;
use mediafold_storage::keys::PUBLIC_URL_PREFIX;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = api_routes(state)
        .merge(page_routes(&config.public_dir))
        .nest_service(PUBLIC_URL_PREFIX, ServeDir::new(&config.uploads_dir))
        .merge(RapiDoc::with_openapi("/api/openapi.json", ApiDoc::openapi()).path("/docs"))
        .fallback_service(ServeDir::new(&config.public_dir))
        // Multipart reads are bounded by the layer below instead
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes))
        .layer(axum::middleware::from_fn(json_payload_too_large))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!(
        max_upload_size_bytes = config.max_upload_size_bytes,
        "Routes configured"
    );

    Ok(app)
}

fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            &format!("{}/upload", API_PREFIX),
            post(handlers::upload::upload_media),
        )
        .route(
            &format!("{}/items", API_PREFIX),
            get(handlers::items::list_items),
        )
        .route(
            &format!("{}/item", API_PREFIX),
            get(handlers::items::get_item),
        )
        .route("/delete", get(handlers::delete::delete_person))
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}

/// Landing, upload and detail pages
fn page_routes(public_dir: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .route_service("/upload", ServeFile::new(public_dir.join("upload.html")))
        .route_service("/detail", ServeFile::new(public_dir.join("detail.html")))
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
