//! Handlers for the `/projects` resource.
//!
//! Any member may read projects. Creating one requires `pm` or `admin`;
//! changing or deleting one is limited to its owner and admins.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tasklane_core::error::CoreError;
use tasklane_core::pagination::Page;
use tasklane_core::types::Id;
use tasklane_core::validation::not_blank;
use tasklane_db::models::project::{CreateProject, Project, ProjectSearch, UpdateProject};
use tasklane_db::repositories::{ProjectRepo, TaskRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MemberPayload;
use crate::middleware::path::IdPath;
use crate::middleware::rbac::ManagerPayload;
use crate::query::PageParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub title: String,
    pub description: Option<String>,
}

/// Request body for `PUT /projects/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Request body for `PATCH /projects`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectIndexRequest {
    #[serde(flatten)]
    pub page: PageParams,
    pub owner_id: Option<Id>,
    /// Substring of the title.
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
///
/// The caller becomes the project owner.
pub async fn create(
    State(state): State<AppState>,
    ManagerPayload(payload): ManagerPayload,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;

    let create_dto = CreateProject {
        owner_id: payload.member_id,
        title: input.title.trim().to_string(),
        description: input.description,
    };

    let project = ProjectRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(project_id = %project.id, owner_id = %project.owner_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PATCH /api/v1/projects
pub async fn index(
    State(state): State<AppState>,
    _payload: MemberPayload,
    Json(input): Json<ProjectIndexRequest>,
) -> AppResult<Json<Page<Project>>> {
    let page = input.page.to_request();
    let filter = ProjectSearch {
        owner_id: input.owner_id,
        search: input.search,
    };

    let (records, projects) = tokio::try_join!(
        ProjectRepo::count(&state.pool, &filter),
        ProjectRepo::list(&state.pool, &filter, &page),
    )?;

    Ok(Json(page.paginate(records, projects)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _payload: MemberPayload,
    IdPath(id): IdPath<Id>,
) -> AppResult<Json<Project>> {
    let project = load_project(&state, id).await?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    ManagerPayload(payload): ManagerPayload,
    IdPath(id): IdPath<Id>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    let project = load_project(&state, id).await?;
    ensure_project_owner(&project, &payload)?;
    input.validate()?;

    let update_dto = UpdateProject {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
    };

    let project = ProjectRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(project_id = %id, member_id = %payload.member_id, "Project updated");
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Soft-delete a project. Refused with 409 while it still has live tasks.
pub async fn delete(
    State(state): State<AppState>,
    ManagerPayload(payload): ManagerPayload,
    IdPath(id): IdPath<Id>,
) -> AppResult<StatusCode> {
    let project = load_project(&state, id).await?;
    ensure_project_owner(&project, &payload)?;

    let live_tasks = TaskRepo::count_in_project(&state.pool, id).await?;
    if live_tasks > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Project still has {live_tasks} task(s)"
        ))));
    }

    let deleted = ProjectRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(project_id = %id, member_id = %payload.member_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a live project or fail with 404.
pub(crate) async fn load_project(state: &AppState, id: Id) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Admins may act on any project; everyone else only on their own.
pub(crate) fn ensure_project_owner(project: &Project, payload: &MemberPayload) -> AppResult<()> {
    if payload.is_admin() || project.owner_id == payload.member_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Not the project owner".into(),
        )))
    }
}
