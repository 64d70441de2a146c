//! Shared helpers for API integration tests: app construction, request
//! builders and a small typed client for the join/login flow.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use tasklane_api::auth::jwt::JwtConfig;
use tasklane_api::config::ServerConfig;
use tasklane_api::router::build_app_router;
use tasklane_api::state::AppState;

/// Password used by every member created through [`join`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Admin self-registration is enabled so tests can create admins through the
/// public API.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        allow_admin_join: true,
        database_url: "postgres://localhost/tasklane_test".to_string(),
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router, with the production middleware stack,
/// on top of the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(config),
    })
}

/// State on a pool that never connects.
pub fn offline_state() -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unreachable")
        .expect("lazy pool should build");
    AppState {
        pool,
        config: Arc::new(test_config()),
    }
}

/// A router whose pool never connects. For requests rejected before any
/// database access.
pub fn build_offline_app() -> Router {
    build_app_router(offline_state())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Typed client
// ---------------------------------------------------------------------------

/// A member created through `POST /auth/{role}/join`.
#[derive(Debug, Clone)]
pub struct TestMember {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub access: String,
    pub refresh: String,
}

impl TestMember {
    fn from_auth_json(json: &Value) -> Self {
        Self {
            id: json["member"]["id"].as_str().unwrap().parse().unwrap(),
            email: json["member"]["email"].as_str().unwrap().to_string(),
            role: json["member"]["role"].as_str().unwrap().to_string(),
            access: json["token"]["access"].as_str().unwrap().to_string(),
            refresh: json["token"]["refresh"].as_str().unwrap().to_string(),
        }
    }
}

/// Join with `role` and the shared [`TEST_PASSWORD`].
pub async fn join(app: &Router, role: &str, email: &str) -> TestMember {
    let body = json!({
        "email": email,
        "name": format!("Test {role}"),
        "password": TEST_PASSWORD,
    });
    let response = post_json(app.clone(), &format!("/api/v1/auth/{role}/join"), body).await;
    let json = expect_json(response, StatusCode::CREATED).await;
    TestMember::from_auth_json(&json)
}

pub async fn login(app: &Router, role: &str, email: &str, password: &str) -> Response<Body> {
    let body = json!({ "email": email, "password": password });
    post_json(app.clone(), &format!("/api/v1/auth/{role}/login"), body).await
}

/// Create a project as `owner` and return its JSON.
pub async fn create_project(app: &Router, owner: &TestMember, title: &str) -> Value {
    let body = json!({ "title": title, "description": "created by tests" });
    let response = post_json_auth(app.clone(), "/api/v1/projects", body, &owner.access).await;
    expect_json(response, StatusCode::CREATED).await
}

/// Create a task in `project_id` as `actor` and return its JSON.
pub async fn create_task(app: &Router, actor: &TestMember, project_id: &str, body: Value) -> Value {
    let uri = format!("/api/v1/projects/{project_id}/tasks");
    let response = post_json_auth(app.clone(), &uri, body, &actor.access).await;
    expect_json(response, StatusCode::CREATED).await
}

pub fn id_of(json: &Value) -> String {
    json["id"].as_str().unwrap().to_string()
}
