//! Integration tests for the Sitecraft Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use sitecraft::config::Config;
use sitecraft::services::{FileStore, MemoryStore};
use sitecraft::web::{create_router, AppState};

mod fixtures;
use fixtures::seed_theme;

/// Creates a test AppState over an in-memory theme store.
fn create_test_state() -> AppState {
    AppState::new(Config::default(), Arc::new(MemoryStore::new()))
        .expect("Failed to create app state")
}

/// Helper to send a request and get the response body as JSON.
async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

// ============================================================================
// Template Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_search_templates_default_page() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/templates").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 6);
    assert_eq!(json["page"], 1);
    assert_eq!(json["limit"], 12);
    assert_eq!(json["totalPages"], 1);
    assert!(json["facets"]["categories"].is_object());
}

#[tokio::test]
async fn test_search_templates_with_filters() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(
        &app,
        "/api/templates?feature=analytics,gallery&premium=true&sort=rating&order=desc",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["tpl-saas-landing", "tpl-business-pro", "tpl-online-store"]);
}

#[tokio::test]
async fn test_search_templates_bad_sort() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/templates?sort=cheapest").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("sort"));
}

#[tokio::test]
async fn test_get_template_and_related() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/templates/tpl-online-store").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["category"], "ecommerce");

    let (status, json) = get_json(&app, "/api/templates/tpl-online-store/related?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "tpl-business-pro");
}

#[tokio::test]
async fn test_get_template_not_found() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/templates/tpl-nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_recommend_templates() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/templates/recommend",
        json!({ "category": "blog", "features": ["newsletter"], "limit": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let recs = json.as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["template"]["id"], "tpl-minimal-blog");
}

// ============================================================================
// Color Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_list_palettes() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/palettes").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!json["palettes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_palette() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/palettes/generate",
        json!({ "base": "#2563eb", "mode": "complementary", "count": 4 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mode"], "complementary");
    assert_eq!(json["colors"].as_array().unwrap().len(), 4);
    assert_eq!(json["colors"][0], "#2563eb");
}

#[tokio::test]
async fn test_generate_palette_uses_config_defaults() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(&app, "/api/palettes/generate", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["base"], "#2563eb");
    assert_eq!(json["mode"], "analogous");
    assert_eq!(json["colors"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_generate_palette_rejects_bad_count() {
    let app = create_router(create_test_state());

    let (status, _) = post_json(&app, "/api/palettes/generate", json!({ "count": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/api/palettes/generate", json!({ "count": 500 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_build_scheme() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/schemes",
        json!({ "base": "#16a34a", "name": "Forest" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Forest");
    assert_eq!(json["colors"]["primary"], "#16a34a");
    assert!(json["audit"].is_array());
}

#[tokio::test]
async fn test_check_contrast() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/contrast",
        json!({ "foreground": "#ffffff", "background": "#000000" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!((json["contrastRatio"].as_f64().unwrap() - 21.0).abs() < 1e-9);
    assert_eq!(json["passesAaa"], true);
}

// ============================================================================
// Theme Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_list_themes_empty() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/themes").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_theme_from_base_color() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/themes",
        json!({ "name": "Brand", "baseColor": "#dc2626" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["name"], "Brand");
    assert_eq!(json["colors"]["primary"], "#dc2626");

    let (_, list) = get_json(&app, "/api/themes").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates_are_all_saved() {
    let app = create_router(create_test_state());

    let handles: Vec<_> = (0..40)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                post_json(&app, "/api/themes", json!({ "name": format!("Theme {i}") })).await
            })
        })
        .collect();
    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, list) = get_json(&app, "/api/themes").await;
    assert_eq!(list.as_array().unwrap().len(), 40);
}

#[tokio::test]
async fn test_create_theme_from_template() {
    let app = create_router(create_test_state());

    let (status, json) = post_json(
        &app,
        "/api/themes",
        json!({ "templateId": "tpl-restaurant" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["name"], "Bistro Theme");
    assert_eq!(json["templateId"], "tpl-restaurant");
}

#[tokio::test]
async fn test_create_theme_requires_name() {
    let app = create_router(create_test_state());

    let (status, _) = post_json(&app, "/api/themes", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/api/themes", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/api/themes", json!({ "templateId": "tpl-nope" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_theme() {
    let state = create_test_state();
    let theme = seed_theme(state.themes(), "Ocean");
    let app = create_router(state);

    let uri = format!("/api/themes/{}", theme.id);
    let (status, json) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!([
            { "section": "name", "value": "Deep Ocean" },
            { "section": "color", "value": { "role": "accent", "value": "#facc15" } }
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Deep Ocean");
    assert_eq!(json["colors"]["accent"], "#facc15");

    // A single update works too
    let (status, json) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "section": "customCss", "value": ".x { color: red; }" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["customCss"], ".x { color: red; }");
}

#[tokio::test]
async fn test_patch_unknown_theme() {
    let app = create_router(create_test_state());

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/themes/theme-0-missing",
        Some(json!({ "section": "name", "value": "X" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_theme() {
    let state = create_test_state();
    let theme = seed_theme(state.themes(), "Ocean");
    let app = create_router(state);
    let uri = format!("/api/themes/{}", theme.id);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_active_theme_roundtrip() {
    let state = create_test_state();
    let theme = seed_theme(state.themes(), "Ocean");
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/themes/active").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.is_null());

    let (status, json) = send(
        &app,
        "PUT",
        "/api/themes/active",
        Some(json!({ "id": theme.id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], theme.id.as_str());

    let (_, json) = get_json(&app, "/api/themes/active").await;
    assert_eq!(json["name"], "Ocean");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/themes/active",
        Some(json!({ "id": "theme-0-missing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_theme_variables() {
    let state = create_test_state();
    let theme = seed_theme(state.themes(), "Ocean");
    let app = create_router(state);

    let (status, json) = get_json(&app, &format!("/api/themes/{}/variables", theme.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["--color-primary"], "#0ea5e9");
    assert_eq!(json["--radius-full"], "9999px");
}

#[tokio::test]
async fn test_theme_stylesheet_is_css() {
    let state = create_test_state();
    let theme = seed_theme(state.themes(), "Ocean");
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/themes/{}/stylesheet", theme.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/css; charset=utf-8"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let css = String::from_utf8(body.to_vec()).unwrap();
    assert!(css.contains(":root {"));
    assert!(css.contains("--font-heading: \"Playfair Display\""));
}

#[tokio::test]
async fn test_file_store_shared_between_states() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = || Arc::new(FileStore::new(temp_dir.path()));

    let first = create_router(AppState::new(Config::default(), store()).unwrap());
    let (status, created) = post_json(&first, "/api/themes", json!({ "name": "Persisted" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let second = create_router(AppState::new(Config::default(), store()).unwrap());
    let (status, json) = get_json(&second, &format!("/api/themes/{}", created["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Persisted");
}
