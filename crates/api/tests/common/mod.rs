#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use mygram_api::auth::jwt::JwtConfig;
use mygram_api::config::{MergeConfig, ServerConfig};
use mygram_api::router::build_app_router;
use mygram_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            issuer: "mygram-api".to_string(),
            audience: "mygram".to_string(),
        },
        merge: MergeConfig::default(),
    }
}

/// Build the full application router on a fresh in-memory store.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> Router {
    build_app_router(AppState::in_memory(config))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::PUT, uri, &body, Some(token))).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// Send a raw body string, for malformed-JSON tests.
pub async fn post_raw_auth(app: &Router, uri: &str, body: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "secret123";

/// Sign up `username` via the API and return the created user JSON.
pub async fn sign_up(app: &Router, username: &str) -> Value {
    let body = serde_json::json!({
        "username": username,
        "password": TEST_PASSWORD,
        "email": format!("{username}@example.com"),
        "date_of_birth": "1990-01-01T00:00:00Z",
    });
    let response = post_json(app, "/users/sign-up", body).await;
    assert_eq!(response.status(), 200, "sign-up of {username} should succeed");
    body_json(response).await
}

/// Log in via the API and return the access token.
pub async fn login(app: &Router, identifier: &str) -> String {
    let body = serde_json::json!({ "identifier": identifier, "password": TEST_PASSWORD });
    let response = post_json(app, "/users/login", body).await;
    assert_eq!(response.status(), 200, "login of {identifier} should succeed");
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Sign up and log in, returning `(user_id, token)`.
pub async fn register(app: &Router, username: &str) -> (i64, String) {
    let user = sign_up(app, username).await;
    let token = login(app, username).await;
    (user["id"].as_i64().unwrap(), token)
}
