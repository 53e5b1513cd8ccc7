use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use super::{AppState, build_router};
use crate::app::services::contact_service::ContactService;
use crate::app::services::record_store::ContactStore;
use crate::config::{ServerConfig, StoreConfig};

const BODY: &str = "1,Ana,ana@gmail.com,5551234567\n\
                    2,Anabel,anabel@yahoo.com,5559876543\n\
                    x,Broken,broken.example.com,12\n";

fn app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.csv");
    std::fs::write(&path, format!("key,name,email,phone\n{}", BODY)).unwrap();

    let store = ContactStore::open(StoreConfig::new(path)).unwrap();
    let state = Arc::new(AppState::new(ContactService::new(Arc::new(store))));
    (dir, build_router(state, &ServerConfig::default()))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn new_contact(key: i64) -> Value {
    json!({"key": key, "name": "Carla Ruiz", "email": "carla@outlook.com", "phone": "5550001111"})
}

#[tokio::test]
async fn test_health() {
    let (_dir, router) = app();
    let (status, body) = send(&router, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["service"], "contact-store");
    assert!(body["data"]["memory"]["totalMb"].is_u64());
}

#[tokio::test]
async fn test_list_and_get() {
    let (_dir, router) = app();

    let (status, body) = send(&router, Method::GET, "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = send(&router, Method::GET, "/api/contacts/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Anabel");

    let (status, body) = send(&router, Method::GET, "/api/contacts/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_non_numeric_path_key() {
    let (_dir, router) = app();
    let (status, body) = send(&router, Method::GET, "/api/contacts/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "key");
}

#[tokio::test]
async fn test_create_update_delete() {
    let (_dir, router) = app();

    let (status, body) = send(&router, Method::POST, "/api/contacts", Some(new_contact(7))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["key"], 7);

    let (status, _) = send(&router, Method::POST, "/api/contacts", Some(new_contact(7))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let update = json!({"name": "Carla Ruiz", "email": "carla@gmail.com", "phone": "5550002222"});
    let (status, body) = send(&router, Method::PUT, "/api/contacts/7", Some(update.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "carla@gmail.com");

    let (status, _) = send(&router, Method::PUT, "/api/contacts/70", Some(update)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&router, Method::DELETE, "/api/contacts/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["key"], 7);

    let (status, _) = send(&router, Method::DELETE, "/api/contacts/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let (_dir, router) = app();
    let invalid = json!({"key": 8, "name": "R2D2", "email": "r2@example.com", "phone": "12"});

    let (status, body) = send(&router, Method::POST, "/api/contacts", Some(invalid)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["phone", "email", "name"]);
}

#[tokio::test]
async fn test_malformed_body() {
    let (_dir, router) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contacts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_and_pagination() {
    let (_dir, router) = app();

    let (status, body) = send(&router, Method::GET, "/api/contacts/search?name=an", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = send(&router, Method::GET, "/api/contacts/search?key=1x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
        send(&router, Method::GET, "/api/contacts/paginated?page=0&size=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["totalPages"], 2);
    assert_eq!(body["data"]["hasNext"], true);

    let (status, _) =
        send(&router, Method::GET, "/api/contacts/paginated?page=first", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reporting_endpoints() {
    let (_dir, router) = app();

    let (_, body) = send(&router, Method::GET, "/api/contacts/count", None).await;
    assert_eq!(body["data"]["count"], 2);

    let (_, body) = send(&router, Method::GET, "/api/contacts/validation", None).await;
    assert_eq!(body["data"]["totalRows"], 3);
    assert_eq!(body["data"]["invalidRows"], 1);

    let (_, body) = send(&router, Method::GET, "/api/contacts/errors", None).await;
    assert!(!body["data"].as_array().unwrap().is_empty());

    let (_, body) = send(&router, Method::GET, "/api/contacts/invalid-data", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&router, Method::GET, "/api/contacts/status", None).await;
    assert_eq!(body["data"]["isLoaded"], true);
    assert_eq!(body["data"]["validRecords"], 2);

    let (_, body) = send(&router, Method::GET, "/api/contacts/stats", None).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["index"]["strategy"], "linear");
}

#[tokio::test]
async fn test_reload() {
    let (dir, router) = app();
    std::fs::write(
        dir.path().join("contacts.csv"),
        "key,name,email,phone\n9,Zoe,zoe@gmail.com,5559990000\n",
    )
    .unwrap();

    let (status, body) = send(&router, Method::POST, "/api/contacts/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["validRows"], 1);
    assert_eq!(body["data"]["invalidRows"], 0);

    let (_, body) = send(&router, Method::GET, "/api/contacts", None).await;
    assert_eq!(body["data"][0]["key"], 9);
}

#[tokio::test]
async fn test_serves_empty_list_when_file_is_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.csv");
    let store = ContactStore::open_or_empty(StoreConfig::new(&path)).unwrap();
    let state = Arc::new(AppState::new(ContactService::new(Arc::new(store))));
    let router = build_router(state, &ServerConfig::default());

    let (status, body) = send(&router, Method::GET, "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (_, body) = send(&router, Method::GET, "/api/contacts/status", None).await;
    assert_eq!(body["data"]["isLoaded"], false);

    let (status, _) = send(&router, Method::POST, "/api/contacts", Some(new_contact(1))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(path.exists());
}

#[tokio::test]
async fn test_last_possible_page() {
    let (_dir, router) = app();
    let uri = format!("/api/contacts/paginated?page={}&size=1", usize::MAX);

    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["data"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["hasNext"], false);
    assert_eq!(body["data"]["hasPrev"], true);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_reads_interleave_with_writes() {
    let (_dir, router) = app();

    let writes = async {
        for key in 10..20 {
            let (status, _) =
                send(&router, Method::POST, "/api/contacts", Some(new_contact(key))).await;
            assert_eq!(status, StatusCode::CREATED);
        }
    };
    let reads = async {
        for _ in 0..10 {
            let (status, body) = send(&router, Method::GET, "/api/contacts/count", None).await;
            assert_eq!(status, StatusCode::OK);
            let count = body["data"]["count"].as_u64().unwrap();
            assert!((2..=12).contains(&count));

            let (status, _) = send(&router, Method::GET, "/api/contacts/stats", None).await;
            assert_eq!(status, StatusCode::OK);
        }
    };
    tokio::join!(writes, reads);

    let (_, body) = send(&router, Method::GET, "/api/contacts/count", None).await;
    assert_eq!(body["data"]["count"], 12);
}

#[tokio::test]
async fn test_stats_report_cache_hit_rate() {
    let (_dir, router) = app();

    let (_, body) = send(&router, Method::GET, "/api/contacts/stats", None).await;
    assert_eq!(body["data"]["index"]["cacheHitRate"], 0.0);
    assert!(body["data"].get("cacheHitRate").is_none());
}
