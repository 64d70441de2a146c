//! Route definitions for the `/projects` resource.
//!
//! Also nests task routes under `/projects/{project_id}/tasks`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// The project id segment is named `{project_id}` everywhere so the nested
/// task routes share one parameter name at that position.
///
/// ```text
/// PATCH  /                                  -> index
/// POST   /                                  -> create
/// GET    /{project_id}                      -> get_by_id
/// PUT    /{project_id}                      -> update
/// DELETE /{project_id}                      -> delete
///
/// PATCH  /{project_id}/tasks                -> task::index
/// POST   /{project_id}/tasks                -> task::create
/// GET    /{project_id}/tasks/{id}           -> task::get_by_id
/// PUT    /{project_id}/tasks/{id}           -> task::update
/// DELETE /{project_id}/tasks/{id}           -> task::delete
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route("/", patch(task::index).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        );

    Router::new()
        .route("/", patch(project::index).post(project::create))
        .route(
            "/{project_id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/tasks", task_routes)
}
