//! Handlers for tasks.
//!
//! Project-scoped routes live under `/projects/{project_id}/tasks`; the
//! status transition and the caller's assignment list live under `/tasks`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tasklane_core::error::CoreError;
use tasklane_core::pagination::Page;
use tasklane_core::roles::Role;
use tasklane_core::types::{Id, Timestamp};
use tasklane_core::validation::not_blank;
use tasklane_db::models::task::{CreateTask, Task, TaskSearch, UpdateTask};
use tasklane_db::models::task_status::TaskStatus;
use tasklane_db::repositories::{MemberRepo, TaskRepo, TaskStatusRepo};
use validator::Validate;

use super::project::{ensure_project_owner, load_project};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MemberPayload;
use crate::middleware::path::IdPath;
use crate::middleware::rbac::{DeveloperPayload, ManagerPayload};
use crate::query::PageParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects/{project_id}/tasks`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to the first status of the catalog.
    pub status_id: Option<Id>,
    pub assignee_id: Option<Id>,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub priority: Option<i16>,
    pub due_at: Option<Timestamp>,
}

/// Request body for `PUT /projects/{project_id}/tasks/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status_id: Option<Id>,
    pub assignee_id: Option<Id>,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub priority: Option<i16>,
    pub due_at: Option<Timestamp>,
}

/// Request body for `PATCH /projects/{project_id}/tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct TaskIndexRequest {
    #[serde(flatten)]
    pub page: PageParams,
    pub status_id: Option<Id>,
    pub assignee_id: Option<Id>,
    /// Substring of the title.
    pub search: Option<String>,
}

/// Request body for `PATCH /tasks/assigned`.
#[derive(Debug, Default, Deserialize)]
pub struct AssignedIndexRequest {
    #[serde(flatten)]
    pub page: PageParams,
    pub status_id: Option<Id>,
    pub search: Option<String>,
}

/// Request body for `PUT /tasks/{task_id}/status`.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status_id: Id,
}

// ---------------------------------------------------------------------------
// Project-scoped handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    ManagerPayload(payload): ManagerPayload,
    IdPath(project_id): IdPath<Id>,
    Json(input): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let project = load_project(&state, project_id).await?;
    ensure_project_owner(&project, &payload)?;
    input.validate()?;

    let status = match input.status_id {
        Some(status_id) => require_status(&state, status_id).await?,
        None => TaskStatusRepo::find_initial(&state.pool)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict(
                    "No task statuses are defined".into(),
                ))
            })?,
    };
    if let Some(assignee_id) = input.assignee_id {
        require_assignable(&state, assignee_id).await?;
    }

    let create_dto = CreateTask {
        project_id,
        status_id: status.id,
        creator_id: payload.member_id,
        assignee_id: input.assignee_id,
        title: input.title.trim().to_string(),
        description: input.description,
        priority: input.priority,
        due_at: input.due_at,
    };

    let task = TaskRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(
        task_id = %task.id,
        project_id = %project_id,
        status = %status.code,
        "Task created"
    );
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/v1/projects/{project_id}/tasks
pub async fn index(
    State(state): State<AppState>,
    _payload: MemberPayload,
    IdPath(project_id): IdPath<Id>,
    Json(input): Json<TaskIndexRequest>,
) -> AppResult<Json<Page<Task>>> {
    load_project(&state, project_id).await?;

    let page = input.page.to_request();
    let filter = TaskSearch {
        project_id: Some(project_id),
        status_id: input.status_id,
        assignee_id: input.assignee_id,
        search: input.search,
    };

    let (records, tasks) = tokio::try_join!(
        TaskRepo::count(&state.pool, &filter),
        TaskRepo::list(&state.pool, &filter, &page),
    )?;

    Ok(Json(page.paginate(records, tasks)))
}

/// GET /api/v1/projects/{project_id}/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _payload: MemberPayload,
    IdPath((project_id, id)): IdPath<(Id, Id)>,
) -> AppResult<Json<Task>> {
    load_project(&state, project_id).await?;
    let task = load_task_in_project(&state, project_id, id).await?;
    Ok(Json(task))
}

/// PUT /api/v1/projects/{project_id}/tasks/{id}
///
/// Merge update. An assignee can be replaced but not cleared.
pub async fn update(
    State(state): State<AppState>,
    ManagerPayload(payload): ManagerPayload,
    IdPath((project_id, id)): IdPath<(Id, Id)>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<Json<Task>> {
    let project = load_project(&state, project_id).await?;
    ensure_project_owner(&project, &payload)?;
    load_task_in_project(&state, project_id, id).await?;
    input.validate()?;

    if let Some(status_id) = input.status_id {
        require_status(&state, status_id).await?;
    }
    if let Some(assignee_id) = input.assignee_id {
        require_assignable(&state, assignee_id).await?;
    }

    let update_dto = UpdateTask {
        status_id: input.status_id,
        assignee_id: input.assignee_id,
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        priority: input.priority,
        due_at: input.due_at,
    };

    let task = TaskRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    tracing::info!(task_id = %id, member_id = %payload.member_id, "Task updated");
    Ok(Json(task))
}

/// DELETE /api/v1/projects/{project_id}/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    ManagerPayload(payload): ManagerPayload,
    IdPath((project_id, id)): IdPath<(Id, Id)>,
) -> AppResult<StatusCode> {
    let project = load_project(&state, project_id).await?;
    ensure_project_owner(&project, &payload)?;
    load_task_in_project(&state, project_id, id).await?;

    let deleted = TaskRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(task_id = %id, member_id = %payload.member_id, "Task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}

// ---------------------------------------------------------------------------
// Member-scoped handlers
// ---------------------------------------------------------------------------

/// PUT /api/v1/tasks/{task_id}/status
///
/// Move a task to another status. Allowed for the assignee, the project
/// owner, and admins.
pub async fn change_status(
    State(state): State<AppState>,
    payload: MemberPayload,
    IdPath(id): IdPath<Id>,
    Json(input): Json<ChangeStatusRequest>,
) -> AppResult<Json<Task>> {
    let task = load_task(&state, id).await?;
    let project = load_project(&state, task.project_id).await?;

    let is_assignee = task.assignee_id == Some(payload.member_id);
    if !is_assignee && ensure_project_owner(&project, &payload).is_err() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the assignee, the project owner or an admin may change the status".into(),
        )));
    }

    let status = require_status(&state, input.status_id).await?;

    let update_dto = UpdateTask {
        status_id: Some(status.id),
        ..Default::default()
    };
    let task = TaskRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    tracing::info!(
        task_id = %id,
        member_id = %payload.member_id,
        status = %status.code,
        "Task status changed"
    );
    Ok(Json(task))
}

/// PATCH /api/v1/tasks/assigned
///
/// Tasks assigned to the calling developer across all live projects. Only
/// developers can be assignees, so other roles are refused.
pub async fn assigned(
    State(state): State<AppState>,
    DeveloperPayload(payload): DeveloperPayload,
    Json(input): Json<AssignedIndexRequest>,
) -> AppResult<Json<Page<Task>>> {
    let page = input.page.to_request();
    let filter = TaskSearch {
        project_id: None,
        status_id: input.status_id,
        assignee_id: Some(payload.member_id),
        search: input.search,
    };

    let (records, tasks) = tokio::try_join!(
        TaskRepo::count(&state.pool, &filter),
        TaskRepo::list(&state.pool, &filter, &page),
    )?;

    Ok(Json(page.paginate(records, tasks)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a live task in a live project or fail with 404.
pub(crate) async fn load_task(state: &AppState, id: Id) -> AppResult<Task> {
    TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))
}

async fn load_task_in_project(state: &AppState, project_id: Id, id: Id) -> AppResult<Task> {
    TaskRepo::find_in_project(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))
}

/// A status referenced in a request body must exist (400 otherwise).
async fn require_status(state: &AppState, status_id: Id) -> AppResult<TaskStatus> {
    TaskStatusRepo::find_by_id(&state.pool, status_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "status_id: unknown task status {status_id}"
            )))
        })
}

/// Only live developers can be assigned tasks.
async fn require_assignable(state: &AppState, member_id: Id) -> AppResult<()> {
    let member = MemberRepo::find_by_id(&state.pool, member_id).await?;
    match member {
        Some(m) if m.role == Role::Developer.as_str() => Ok(()),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "assignee_id: {member_id} is not an active developer"
        )))),
    }
}
