//! Handlers for comments under `/tasks/{task_id}/comments`.
//!
//! Any member may comment; only the author may edit or delete a comment.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tasklane_core::error::CoreError;
use tasklane_core::pagination::Page;
use tasklane_core::types::Id;
use tasklane_core::validation::not_blank;
use tasklane_db::models::comment::{CreateTaskComment, TaskComment, UpdateTaskComment};
use tasklane_db::repositories::TaskCommentRepo;
use validator::Validate;

use super::task::load_task;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MemberPayload;
use crate::middleware::path::IdPath;
use crate::query::PageParams;
use crate::state::AppState;

/// Request body for `POST /tasks/{task_id}/comments`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 5000, message = "must be at most 5000 characters")
    )]
    pub body: String,
}

/// Request body for `PUT /tasks/{task_id}/comments/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 5000, message = "must be at most 5000 characters")
    )]
    pub body: Option<String>,
}

/// POST /api/v1/tasks/{task_id}/comments
pub async fn create(
    State(state): State<AppState>,
    payload: MemberPayload,
    IdPath(task_id): IdPath<Id>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<TaskComment>)> {
    load_task(&state, task_id).await?;
    input.validate()?;

    let create_dto = CreateTaskComment {
        task_id,
        author_id: payload.member_id,
        body: input.body,
    };

    let comment = TaskCommentRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(comment_id = %comment.id, task_id = %task_id, "Comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

/// PATCH /api/v1/tasks/{task_id}/comments
pub async fn index(
    State(state): State<AppState>,
    _payload: MemberPayload,
    IdPath(task_id): IdPath<Id>,
    Json(input): Json<PageParams>,
) -> AppResult<Json<Page<TaskComment>>> {
    load_task(&state, task_id).await?;

    let page = input.to_request();
    let (records, comments) = tokio::try_join!(
        TaskCommentRepo::count_for_task(&state.pool, task_id),
        TaskCommentRepo::list_for_task(&state.pool, task_id, &page),
    )?;

    Ok(Json(page.paginate(records, comments)))
}

/// PUT /api/v1/tasks/{task_id}/comments/{id}
pub async fn update(
    State(state): State<AppState>,
    payload: MemberPayload,
    IdPath((task_id, id)): IdPath<(Id, Id)>,
    Json(input): Json<UpdateCommentRequest>,
) -> AppResult<Json<TaskComment>> {
    load_authored_comment(&state, &payload, task_id, id).await?;
    input.validate()?;

    let update_dto = UpdateTaskComment { body: input.body };
    let comment = TaskCommentRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    tracing::info!(comment_id = %id, "Comment updated");
    Ok(Json(comment))
}

/// DELETE /api/v1/tasks/{task_id}/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    payload: MemberPayload,
    IdPath((task_id, id)): IdPath<(Id, Id)>,
) -> AppResult<StatusCode> {
    load_authored_comment(&state, &payload, task_id, id).await?;

    let deleted = TaskCommentRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(comment_id = %id, "Comment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))
    }
}

/// Fetch a comment of a live task and require the caller to be its author.
async fn load_authored_comment(
    state: &AppState,
    payload: &MemberPayload,
    task_id: Id,
    id: Id,
) -> AppResult<TaskComment> {
    load_task(state, task_id).await?;

    let comment = TaskCommentRepo::find_in_task(&state.pool, task_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    if comment.author_id != payload.member_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author may change this comment".into(),
        )));
    }
    Ok(comment)
}
