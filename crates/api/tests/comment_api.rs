//! HTTP-level integration tests for task comments.

mod common;

use axum::http::StatusCode;
use common::{
    create_project, create_task, delete_auth, expect_json, id_of, join, patch_json_auth,
    post_json_auth, put_json_auth, TestMember,
};
use serde_json::json;
use sqlx::PgPool;

/// A task in a fresh project plus the pm that owns it and a developer.
async fn setup(app: &axum::Router) -> (TestMember, TestMember, String) {
    let pm = join(app, "pm", "pm@tasklane.test").await;
    let dev = join(app, "developer", "dev@tasklane.test").await;
    let project = create_project(app, &pm, "Apollo").await;
    let task = create_task(app, &pm, &id_of(&project), json!({ "title": "Launch" })).await;
    (pm, dev, id_of(&task))
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_any_member_comments_and_lists(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (pm, dev, task_id) = setup(&app).await;
    let uri = format!("/api/v1/tasks/{task_id}/comments");

    let response = post_json_auth(app.clone(), &uri, json!({ "body": "First" }), &dev.access).await;
    let first = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(first["author_id"], dev.id.to_string());
    assert_eq!(first["task_id"], task_id);

    post_json_auth(app.clone(), &uri, json!({ "body": "Second" }), &pm.access).await;
    post_json_auth(app.clone(), &uri, json!({ "body": "Third" }), &dev.access).await;

    let response = patch_json_auth(app, &uri, json!({ "limit": 2 }), &pm.access).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["pagination"]["records"], 3);
    assert_eq!(json["pagination"]["pages"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][0]["body"], "First");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_comment_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_pm, dev, task_id) = setup(&app).await;

    let uri = format!("/api/v1/tasks/{task_id}/comments");
    let response = post_json_auth(app, &uri, json!({ "body": "  " }), &dev.access).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_on_unknown_task_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let dev = join(&app, "developer", "dev@tasklane.test").await;

    let uri = format!("/api/v1/tasks/{}/comments", uuid::Uuid::new_v4());
    let response = post_json_auth(app, &uri, json!({ "body": "Hello?" }), &dev.access).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_author_edits_or_deletes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (pm, dev, task_id) = setup(&app).await;
    let uri = format!("/api/v1/tasks/{task_id}/comments");

    let response = post_json_auth(app.clone(), &uri, json!({ "body": "Draft" }), &dev.access).await;
    let comment = expect_json(response, StatusCode::CREATED).await;
    let comment_uri = format!("{uri}/{}", id_of(&comment));

    let response = put_json_auth(app.clone(), &comment_uri, json!({ "body": "Hijacked" }), &pm.access).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &comment_uri, &pm.access).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &comment_uri, json!({ "body": "Final" }), &dev.access).await;
    let updated = expect_json(response, StatusCode::OK).await;
    assert_eq!(updated["body"], "Final");
    assert_eq!(updated["created_at"], comment["created_at"]);

    let response = delete_auth(app.clone(), &comment_uri, &dev.access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app.clone(), &comment_uri, &dev.access).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json_auth(app, &uri, json!({}), &dev.access).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["pagination"]["records"], 0);
}
