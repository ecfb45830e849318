//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p mediafold-api`. Every `TestApp`
//! owns a temporary directory holding its uploads and public pages.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use mediafold_api::constants;
use mediafold_api::setup::routes;
use mediafold_api::state::AppState;
use mediafold_core::{Config, Manifest};
use mediafold_storage::{LocalStorage, Storage, MANIFEST_FILE_NAME};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const LANDING_PAGE: &str = "<!doctype html><title>mediafold</title>";

/// API path prefix for tests (e.g. `/api/items`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server, shared state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.state.config.uploads_dir
    }

    pub fn folder(&self, name: &str) -> PathBuf {
        self.uploads_dir().join(name)
    }

    /// Manifest of a folder as stored on disk.
    pub fn manifest(&self, folder: &str) -> Manifest {
        let raw = std::fs::read(self.folder(folder).join(MANIFEST_FILE_NAME))
            .expect("Failed to read manifest");
        serde_json::from_slice(&raw).expect("Manifest is not valid JSON")
    }

    /// Write a manifest body straight to disk, bypassing the API.
    pub fn write_manifest(&self, folder: &str, body: &str) {
        let dir = self.folder(folder);
        std::fs::create_dir_all(&dir).expect("Failed to create folder");
        std::fs::write(dir.join(MANIFEST_FILE_NAME), body).expect("Failed to write manifest");
    }

    /// Top-level folder names, sorted.
    pub fn folders(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads_dir())
            .expect("Failed to read uploads dir")
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

/// Defaults from an empty environment, rooted in `root`.
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::from_vars(|_| None).expect("Default config should load");
    config.uploads_dir = root.join("uploads");
    config.public_dir = root.join("public");
    config
}

/// Setup test app with local storage in a fresh temp directory.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}, |local| Arc::new(local) as Arc<dyn Storage>).await
}

/// Setup test app after adjusting the default test config.
pub async fn setup_test_app_with_config(customize: impl FnOnce(&mut Config)) -> TestApp {
    setup_test_app_with(customize, |local| Arc::new(local) as Arc<dyn Storage>).await
}

/// Setup test app whose storage wraps the local backend.
pub async fn setup_test_app_with_storage(
    wrap: impl FnOnce(LocalStorage) -> Arc<dyn Storage>,
) -> TestApp {
    setup_test_app_with(|_| {}, wrap).await
}

async fn setup_test_app_with(
    customize: impl FnOnce(&mut Config),
    wrap: impl FnOnce(LocalStorage) -> Arc<dyn Storage>,
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = test_config(temp_dir.path());
    customize(&mut config);

    std::fs::create_dir_all(&config.public_dir).expect("Failed to create public dir");
    std::fs::write(config.public_dir.join("index.html"), LANDING_PAGE)
        .expect("Failed to write landing page");

    let local = LocalStorage::new(&config.uploads_dir)
        .await
        .expect("Failed to create local storage");
    let storage = wrap(local);

    let state = Arc::new(AppState::new(config.clone(), storage));
    let app = routes::setup_routes(&config, state.clone()).expect("Failed to setup routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// One file part: `(original name, content type, bytes)`.
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

pub fn upload_form(class_name: &str, person_name: &str, files: &[FilePart<'_>]) -> MultipartForm {
    let mut form = MultipartForm::new()
        .add_text("className", class_name.to_string())
        .add_text("personName", person_name.to_string());
    for (name, mime, data) in files {
        let part = Part::bytes(data.to_vec())
            .file_name(name.to_string())
            .mime_type(mime.to_string());
        form = form.add_part("files", part);
    }
    form
}

pub async fn post_upload(client: &TestServer, form: MultipartForm) -> TestResponse {
    client.post(&api_path("/upload")).multipart(form).await
}

/// Upload and return the JSON body, asserting success.
pub async fn upload_ok(
    client: &TestServer,
    class_name: &str,
    person_name: &str,
    files: &[FilePart<'_>],
) -> serde_json::Value {
    let response = post_upload(client, upload_form(class_name, person_name, files)).await;
    assert_eq!(response.status_code(), 200, "upload failed: {}", response.text());
    response.json()
}
