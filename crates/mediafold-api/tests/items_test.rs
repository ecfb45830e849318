//! Item query API integration tests.
//!
//! Run with: `cargo test -p mediafold-api --test items_test`

mod helpers;

use helpers::fixtures::create_minimal_png;
use helpers::{api_path, setup_test_app, setup_test_app_with_config, upload_ok};
use mediafold_core::CorruptManifestPolicy;
use serde_json::json;

#[tokio::test]
async fn test_list_items_empty() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/items")).await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({ "items": [] }));
}

#[tokio::test]
async fn test_list_items_newest_first_across_folders() {
    let app = setup_test_app().await;
    app.write_manifest(
        "Math_Alice",
        &json!({ "items": [
            { "filename": "100_a.png", "uploadedAt": 100, "className": "Math", "personName": "Alice" },
            { "filename": "300_c.png", "uploadedAt": 300, "className": "Math", "personName": "Alice" },
            { "filename": "legacy.png", "className": "Math", "personName": "Alice" }
        ]})
        .to_string(),
    );
    app.write_manifest(
        "Art_Bob",
        &json!({ "items": [
            { "filename": "200_b.png", "uploadedAt": 200, "className": "Art", "personName": "Bob" }
        ]})
        .to_string(),
    );

    let body: serde_json::Value = app.client().get(&api_path("/items")).await.json();
    let items = body["items"].as_array().expect("items array");

    let order: Vec<&str> = items
        .iter()
        .map(|i| i["filename"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["300_c.png", "200_b.png", "100_a.png", "legacy.png"]);

    assert_eq!(items[1]["folderName"], "Art_Bob");
    assert_eq!(items[1]["id"], "Art_Bob/200_b.png");
    assert_eq!(items[3]["url"], "/uploads/Math_Alice/legacy.png");
}

#[tokio::test]
async fn test_list_items_skips_corrupt_manifest() {
    let app = setup_test_app().await;
    let png = create_minimal_png();
    upload_ok(app.client(), "Math", "Alice", &[("a.png", "image/png", &png[..])]).await;
    app.write_manifest("Art_Bob", "{ not json");

    let response = app.client().get(&api_path("/items")).await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["folderName"], "Math_Alice");
}

#[tokio::test]
async fn test_corrupt_manifest_is_replaced_on_next_upload() {
    let app = setup_test_app().await;
    let png = create_minimal_png();
    app.write_manifest("Math_Alice", "[broken");

    upload_ok(app.client(), "Math", "Alice", &[("a.png", "image/png", &png[..])]).await;

    assert_eq!(app.manifest("Math_Alice").items.len(), 1);
}

#[tokio::test]
async fn test_corrupt_manifest_fail_policy_rejects_upload() {
    let app = setup_test_app_with_config(|config| {
        config.corrupt_manifest_policy = CorruptManifestPolicy::Fail;
    })
    .await;
    let png = create_minimal_png();
    app.write_manifest("Math_Alice", "[broken");

    let response = app
        .client()
        .post(&api_path("/upload"))
        .multipart(helpers::upload_form(
            "Math",
            "Alice",
            &[("a.png", "image/png", &png[..])],
        ))
        .await;

    assert_eq!(response.status_code(), 500);
    let raw = std::fs::read_to_string(app.folder("Math_Alice").join("index.json")).unwrap();
    assert_eq!(raw, "[broken");
}

#[tokio::test]
async fn test_get_item_by_id() {
    let app = setup_test_app().await;
    let png = create_minimal_png();
    let uploaded = upload_ok(app.client(), "Math", "Alice", &[("a.png", "image/png", &png[..])]).await;
    let id = uploaded["items"][0]["id"].as_str().unwrap().to_string();

    let response = app
        .client()
        .get(&api_path("/item"))
        .add_query_param("id", &id)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["item"]["id"], id.as_str());
    assert_eq!(body["item"]["folderName"], "Math_Alice");
    assert_eq!(body["item"]["uploadedAt"], uploaded["items"][0]["uploadedAt"]);
}

#[tokio::test]
async fn test_get_item_missing_id() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/item")).await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "id required");

    let response = app
        .client()
        .get(&api_path("/item"))
        .add_query_param("id", "")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_get_item_invalid_id() {
    let app = setup_test_app().await;

    for id in ["no-slash", "/a.png", "Math_Alice/", "../a.png", "./a.png"] {
        let response = app
            .client()
            .get(&api_path("/item"))
            .add_query_param("id", id)
            .await;
        assert_eq!(response.status_code(), 400, "id {:?}", id);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "invalid id");
    }
}

#[tokio::test]
async fn test_get_item_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/item"))
        .add_query_param("id", "Math_Alice/nothing.png")
        .await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "not found");
}

#[tokio::test]
async fn test_get_legacy_item_by_url_is_backfilled() {
    let app = setup_test_app().await;
    app.write_manifest(
        "Art_Bob",
        &json!({ "items": [
            { "url": "/uploads/Art_Bob/123_x.png", "uploadedAt": 123, "description": "old" }
        ]})
        .to_string(),
    );

    let response = app
        .client()
        .get(&api_path("/item"))
        .add_query_param("id", "Art_Bob/123_x.png")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["item"]["filename"], "123_x.png");
    assert_eq!(body["item"]["id"], "Art_Bob/123_x.png");
    assert_eq!(body["item"]["folderName"], "Art_Bob");
    assert_eq!(body["item"]["description"], "old");

    // Read-time only: the manifest on disk is untouched.
    let manifest = app.manifest("Art_Bob");
    assert!(manifest.items[0].id.is_none());
}
