//! Handlers for the `/task-statuses` catalog.
//!
//! Reads are open to every member; writes require the `admin` role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tasklane_core::error::CoreError;
use tasklane_core::types::Id;
use tasklane_core::validation::not_blank;
use tasklane_db::models::task_status::{CreateTaskStatus, TaskStatus, UpdateTaskStatus};
use tasklane_db::repositories::TaskStatusRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MemberPayload;
use crate::middleware::path::IdPath;
use crate::middleware::rbac::AdminPayload;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /task-statuses`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskStatusRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 50, message = "must be at most 50 characters")
    )]
    pub code: String,
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: String,
    pub sort_order: Option<i32>,
}

/// Request body for `PUT /task-statuses/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskStatusRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 50, message = "must be at most 50 characters")
    )]
    pub code: Option<String>,
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

/// GET /api/v1/task-statuses
pub async fn list(
    State(state): State<AppState>,
    _payload: MemberPayload,
) -> AppResult<Json<DataResponse<Vec<TaskStatus>>>> {
    let statuses = TaskStatusRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: statuses }))
}

/// POST /api/v1/task-statuses
pub async fn create(
    State(state): State<AppState>,
    AdminPayload(_admin): AdminPayload,
    Json(input): Json<CreateTaskStatusRequest>,
) -> AppResult<(StatusCode, Json<TaskStatus>)> {
    input.validate()?;

    let create_dto = CreateTaskStatus {
        code: input.code.trim().to_string(),
        name: input.name.trim().to_string(),
        sort_order: input.sort_order,
    };

    let status = TaskStatusRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(status_id = %status.id, code = %status.code, "Task status created");
    Ok((StatusCode::CREATED, Json(status)))
}

/// GET /api/v1/task-statuses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _payload: MemberPayload,
    IdPath(id): IdPath<Id>,
) -> AppResult<Json<TaskStatus>> {
    let status = TaskStatusRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TaskStatus",
            id,
        }))?;
    Ok(Json(status))
}

/// PUT /api/v1/task-statuses/{id}
pub async fn update(
    State(state): State<AppState>,
    AdminPayload(_admin): AdminPayload,
    IdPath(id): IdPath<Id>,
    Json(input): Json<UpdateTaskStatusRequest>,
) -> AppResult<Json<TaskStatus>> {
    input.validate()?;

    let update_dto = UpdateTaskStatus {
        code: input.code.map(|c| c.trim().to_string()),
        name: input.name.map(|n| n.trim().to_string()),
        sort_order: input.sort_order,
    };

    let status = TaskStatusRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TaskStatus",
            id,
        }))?;
    tracing::info!(status_id = %id, "Task status updated");
    Ok(Json(status))
}

/// DELETE /api/v1/task-statuses/{id}
///
/// Refused with 409 while any task, live or soft-deleted, still uses the status.
pub async fn delete(
    State(state): State<AppState>,
    AdminPayload(_admin): AdminPayload,
    IdPath(id): IdPath<Id>,
) -> AppResult<StatusCode> {
    TaskStatusRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TaskStatus",
            id,
        }))?;

    let references = TaskStatusRepo::count_references(&state.pool, id).await?;
    if references > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Task status is used by {references} task(s)"
        ))));
    }

    TaskStatusRepo::delete(&state.pool, id).await?;
    tracing::info!(status_id = %id, "Task status deleted");
    Ok(StatusCode::NO_CONTENT)
}
