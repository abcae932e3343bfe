/// HTTP API tests: requests go straight into the router, no socket
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use metanord_server::{router, AppState, PageEventKind, PageStore};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn app() -> (TempDir, AppState, Router) {
    let dir = tempfile::tempdir().unwrap();
    let store = PageStore::open(dir.path()).unwrap();
    let state = AppState::new(store, "en");
    let app = router(state.clone());
    (dir, state, app)
}

fn home_page() -> Value {
    json!({
        "id": "page-1",
        "slug": "home",
        "title": { "value": "Home", "translations": { "ru": "Главная" } },
        "sections": [
            {
                "id": "s1",
                "title": "Hero",
                "components": [
                    {
                        "id": "c1",
                        "type": "heading",
                        "parentSectionId": "s1",
                        "content": { "text": { "value": "Aluminium", "translations": { "et": "Alumiinium" } } }
                    },
                    {
                        "id": "c2",
                        "type": "image",
                        "parentSectionId": "s1",
                        "props": { "src": "/uploads/hero.jpg" }
                    }
                ]
            },
            {
                "id": "s2",
                "title": "Draft",
                "settings": { "hidden": true }
            }
        ]
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_save_and_fetch_page() {
    let (dir, _state, app) = app();

    let (status, body) = send(&app, "PUT", "/api/pages/home", Some(json!({ "page": home_page() }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "slug": "home", "version": 1 }));
    assert!(dir.path().join("home.json").exists());

    let (status, body) = send(&app, "GET", "/api/pages/home", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 1);
    assert_eq!(body["page"]["sections"][0]["components"][0]["id"], "c1");
    assert!(body["page"]["updatedAt"].is_string());

    let (status, body) = send(&app, "GET", "/api/pages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["slug"], "home");
    assert_eq!(body[0]["title"], "Home");
    assert_eq!(body[0]["components"], 2);
}

#[tokio::test]
async fn test_localized_view() {
    let (_dir, _state, app) = app();
    send(&app, "PUT", "/api/pages/home", Some(json!({ "page": home_page() }))).await;

    let (status, body) = send(&app, "GET", "/api/pages/home?lang=et", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lang"], "et");
    // Title has no Estonian translation, falls back to the default
    assert_eq!(body["title"], "Home");
    assert_eq!(body["sections"].as_array().unwrap().len(), 1);
    assert_eq!(body["sections"][0]["components"][0]["content"]["text"], "Alumiinium");

    let (_, list) = send(&app, "GET", "/api/pages?lang=ru", None).await;
    assert_eq!(list[0]["title"], "Главная");
}

#[tokio::test]
async fn test_missing_page_is_404() {
    let (_dir, _state, app) = app();

    let (status, body) = send(&app, "GET", "/api/pages/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nowhere"));

    let (status, _) = send(&app, "DELETE", "/api/pages/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stale_save_conflicts() {
    let (_dir, _state, app) = app();
    send(&app, "PUT", "/api/pages/home", Some(json!({ "page": home_page() }))).await;
    let (status, body) = send(
        &app,
        "PUT",
        "/api/pages/home",
        Some(json!({ "page": home_page(), "expectedVersion": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 2);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/pages/home",
        Some(json!({ "page": home_page(), "expectedVersion": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["expectedVersion"], 1);
    assert_eq!(body["currentVersion"], 2);
}

#[tokio::test]
async fn test_rejects_bad_pages() {
    let (_dir, _state, app) = app();

    let (status, _) = send(&app, "PUT", "/api/pages/about", Some(json!({ "page": home_page() }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut orphan = home_page();
    orphan["sections"][0]["components"][0]["parentSectionId"] = json!("s2");
    let (status, body) = send(&app, "PUT", "/api/pages/home", Some(json!({ "page": orphan }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/api/pages", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_apply_mutations() {
    let (_dir, _state, app) = app();
    send(&app, "PUT", "/api/pages/home", Some(json!({ "page": home_page() }))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/pages/home/mutations",
        Some(json!({
            "expectedVersion": 1,
            "mutations": [
                { "type": "moveComponent", "componentId": "c2", "targetSectionId": "s2", "index": 0 },
                { "type": "updateSection", "sectionId": "s1", "title": "Intro" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 2);

    let (_, body) = send(&app, "GET", "/api/pages/home", None).await;
    let sections = &body["page"]["sections"];
    assert_eq!(sections[0]["title"], json!({ "value": "Intro" }));
    assert_eq!(sections[1]["components"][0]["id"], "c2");
    assert_eq!(sections[1]["components"][0]["parentSectionId"], "s2");
}

#[tokio::test]
async fn test_failed_mutation_saves_nothing() {
    let (_dir, _state, app) = app();
    send(&app, "PUT", "/api/pages/home", Some(json!({ "page": home_page() }))).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/pages/home/mutations",
        Some(json!({
            "mutations": [
                { "type": "removeComponent", "componentId": "c1" },
                { "type": "removeComponent", "componentId": "ghost" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, "GET", "/api/pages/home", None).await;
    assert_eq!(body["version"], 1);
    assert_eq!(body["page"]["sections"][0]["components"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_assets() {
    let (_dir, _state, app) = app();
    send(&app, "PUT", "/api/pages/home", Some(json!({ "page": home_page() }))).await;

    let (status, body) = send(&app, "GET", "/api/pages/home/assets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["path"], "/uploads/hero.jpg");
    assert_eq!(body[0]["componentId"], "c2");
}

#[tokio::test]
async fn test_changes_are_broadcast() {
    let (dir, state, app) = app();
    let mut events = state.subscribe();

    send(&app, "PUT", "/api/pages/home", Some(json!({ "page": home_page() }))).await;
    let (status, _) = send(&app, "DELETE", "/api/pages/home", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!dir.path().join("home.json").exists());

    let saved = events.recv().await.unwrap();
    assert_eq!(saved.slug, "home");
    assert_eq!(saved.kind, PageEventKind::Saved);
    assert_eq!(saved.version, 1);

    let deleted = events.recv().await.unwrap();
    assert_eq!(deleted.kind, PageEventKind::Deleted);
}

#[tokio::test]
async fn test_malformed_bodies_get_json_errors() {
    let (_dir, _state, app) = app();

    let (status, body) = send(&app, "PUT", "/api/pages/home", Some(json!({ "page": { "id": "p" } }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("slug"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/pages/home/mutations",
        Some(json!({ "mutations": [{ "type": "explode" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let request = Request::builder()
        .method("PUT")
        .uri("/api/pages/home")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}
