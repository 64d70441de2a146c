//! HTTP-level integration tests for join, login, refresh and `me`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app_with, delete_auth, expect_json, get_auth, join, login, post_json,
    test_config, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_join_returns_member_and_token_bundle(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": "pm@tasklane.test", "name": "  Pat Manager ", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/pm/join", body).await;
    let json = expect_json(response, StatusCode::CREATED).await;

    assert_eq!(json["member"]["email"], "pm@tasklane.test");
    assert_eq!(json["member"]["name"], "Pat Manager");
    assert_eq!(json["member"]["role"], "pm");
    assert!(json["member"].get("password_hash").is_none());
    assert!(json["token"]["access"].is_string());
    assert!(json["token"]["refresh"].is_string());

    let expired_at = json["token"]["expired_at"].as_str().unwrap();
    let refreshable_until = json["token"]["refreshable_until"].as_str().unwrap();
    let expired_at = chrono::DateTime::parse_from_rfc3339(expired_at).unwrap();
    let refreshable_until = chrono::DateTime::parse_from_rfc3339(refreshable_until).unwrap();
    assert!(refreshable_until > expired_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_join_duplicate_email_is_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    join(&app, "developer", "dup@tasklane.test").await;

    let body = json!({ "email": "dup@tasklane.test", "name": "Again", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/pm/join", body).await;
    let json = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_join_stores_lowercased_email_and_rejects_case_variants(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": " Alice@Tasklane.Test ", "name": "Alice", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/developer/join", body).await;
    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["member"]["email"], "alice@tasklane.test");

    let body = json!({ "email": "alice@tasklane.test", "name": "Alice Again", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/pm/join", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = login(&app, "developer", "ALICE@tasklane.test", TEST_PASSWORD).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["member"]["email"], "alice@tasklane.test");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_join_rejects_short_password_and_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": "short@tasklane.test", "name": "Shorty", "password": "abc" });
    let response = post_json(app.clone(), "/api/v1/auth/developer/join", body).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let body = json!({ "email": "nope", "name": "Bad Email", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/developer/join", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_join_unknown_role_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": "x@tasklane.test", "name": "X", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/superuser/join", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_join_is_closed_by_default(pool: PgPool) {
    let config = tasklane_api::config::ServerConfig {
        allow_admin_join: false,
        ..test_config()
    };
    let app = build_test_app_with(pool, config);

    let body = json!({ "email": "root@tasklane.test", "name": "Root", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/admin/join", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Other roles stay open.
    join(&app, "pm", "open@tasklane.test").await;
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_join_then_login_authenticates_me(pool: PgPool) {
    let app = common::build_test_app(pool);
    let member = join(&app, "developer", "dev@tasklane.test").await;

    let response = login(&app, "developer", "dev@tasklane.test", TEST_PASSWORD).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["member"]["id"], member.id.to_string());
    let access = json["token"]["access"].as_str().unwrap();

    let response = get_auth(app, "/api/v1/auth/me", access).await;
    let me = expect_json(response, StatusCode::OK).await;
    assert_eq!(me["id"], member.id.to_string());
    assert_eq!(me["email"], "dev@tasklane.test");
    assert_eq!(me["role"], "developer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    join(&app, "pm", "pm@tasklane.test").await;

    let response = login(&app, "pm", "pm@tasklane.test", "incorrect-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_with_other_role_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    join(&app, "pm", "pm@tasklane.test").await;

    let response = login(&app, "developer", "pm@tasklane.test", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_email_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = login(&app, "pm", "ghost@tasklane.test", TEST_PASSWORD).await;
    let json = expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(json["error"], "Invalid email or password");
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_issues_new_bundle(pool: PgPool) {
    let app = common::build_test_app(pool);
    let member = join(&app, "pm", "pm@tasklane.test").await;

    let body = json!({ "refresh_token": member.refresh });
    let response = post_json(app.clone(), "/api/v1/auth/refresh", body).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["member"]["id"], member.id.to_string());
    let new_refresh = json["token"]["refresh"].as_str().unwrap();
    assert_ne!(new_refresh, member.refresh);

    let access = json["token"]["access"].as_str().unwrap();
    let response = get_auth(app, "/api/v1/auth/me", access).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_with_access_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let member = join(&app, "pm", "pm@tasklane.test").await;

    let body = json!({ "refresh_token": member.access });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_with_garbage_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_member_cannot_login_or_refresh(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = join(&app, "admin", "admin@tasklane.test").await;
    let dev = join(&app, "developer", "dev@tasklane.test").await;

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/members/{}", dev.id),
        &admin.access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = login(&app, "developer", "dev@tasklane.test", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json!({ "refresh_token": dev.refresh });
    let response = post_json(app.clone(), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The access token is still valid as a JWT, but the member is gone.
    let response = get_auth(app, "/api/v1/auth/me", &dev.access).await;
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
