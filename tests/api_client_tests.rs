//! HTTP client behavior tests
//!
//! Covers the bearer-header discipline and the status-to-error mapping
//! against a stub server on an ephemeral port.

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;

use finder::api::ApiClient;
use finder::auth::{TokenStore, TOKEN_MAX_AGE_SECS};
use finder::config::ApiConfig;
use finder::error::Error;

async fn secure_handler(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer tok1") => (StatusCode::OK, Json(json!({"ok": true}))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "invalid token"})),
        ),
    }
}

async fn forbidden_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"message": "not allowed"})),
    )
}

async fn broken_handler() -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string())
}

async fn echo_query_handler(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!(params))
}

async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/secure", get(secure_handler))
        .route("/forbidden", get(forbidden_handler))
        .route("/broken", get(broken_handler))
        .route("/echo", get(echo_query_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr, store: &TokenStore) -> ApiClient {
    let config = ApiConfig {
        base_url: format!("http://{}", addr),
        timeout_secs: 5,
    };
    ApiClient::new(&config, store).unwrap()
}

fn empty_store(dir: &tempfile::TempDir) -> TokenStore {
    TokenStore::new(dir.path().join("finder-token"))
}

#[tokio::test]
async fn test_401_maps_to_auth_rejected() {
    let addr = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(addr, &empty_store(&dir));

    let err = client.get::<Value>("/secure", &[]).await.unwrap_err();
    match err {
        Error::AuthRejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid token");
        }
        other => panic!("expected AuthRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_403_maps_to_auth_rejected() {
    let addr = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(addr, &empty_store(&dir));

    let err = client.get::<Value>("/forbidden", &[]).await.unwrap_err();
    assert!(err.is_auth_rejected());
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_other_statuses_map_to_http_error_with_body_message() {
    let addr = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(addr, &empty_store(&dir));

    let err = client.get::<Value>("/broken", &[]).await.unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Http, got {:?}", other),
    }
}

#[tokio::test]
async fn test_query_parameters_are_sent() {
    let addr = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(addr, &empty_store(&dir));

    let echoed: HashMap<String, String> = client
        .get(
            "/echo",
            &[("page", "0".to_string()), ("size", "6".to_string())],
        )
        .await
        .unwrap();

    assert_eq!(echoed.get("page").map(String::as_str), Some("0"));
    assert_eq!(echoed.get("size").map(String::as_str), Some("6"));
}

#[tokio::test]
async fn test_header_installed_after_construction_applies_to_later_requests() {
    let addr = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(addr, &empty_store(&dir));

    // No token anywhere yet
    assert!(client.get::<Value>("/secure", &[]).await.is_err());

    // The header slot is read per request, so installing now is enough
    client.set_auth_header("tok1").await;
    let body: Value = client.get("/secure", &[]).await.unwrap();
    assert_eq!(body["ok"], true);

    client.clear_auth_header().await;
    assert!(client.get::<Value>("/secure", &[]).await.is_err());
}

#[tokio::test]
async fn test_construction_prepopulates_header_from_stored_token() {
    let addr = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let store = empty_store(&dir);
    store.save("tok1", TOKEN_MAX_AGE_SECS).unwrap();

    // The reload-after-login case: nothing signs in, the header is just there
    let client = client_for(addr, &store);
    assert_eq!(client.auth_header().await, Some("Bearer tok1".to_string()));

    let body: Value = client.get("/secure", &[]).await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_unreachable_origin_maps_to_network_error() {
    // Nothing listens here; bind-then-drop guarantees a free port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(addr, &empty_store(&dir));

    let err = client.get::<Value>("/secure", &[]).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}
