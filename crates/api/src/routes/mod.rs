pub mod auth;
pub mod health;
pub mod member;
pub mod project;
pub mod task;
pub mod task_status;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/{role}/join                                join (public)
/// /auth/{role}/login                               login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/me                                         current member
///
/// /members                                         index (PATCH, admin only)
/// /members/{id}                                    get, update, delete (admin only)
///
/// /task-statuses                                   list, create (admin)
/// /task-statuses/{id}                              get, update (admin), delete (admin)
///
/// /projects                                        index (PATCH), create (pm/admin)
/// /projects/{project_id}                           get, update, delete (owner/admin)
/// /projects/{project_id}/tasks                     index (PATCH), create (owner/admin)
/// /projects/{project_id}/tasks/{id}                get, update, delete (owner/admin)
///
/// /tasks/assigned                                  caller's tasks (PATCH)
/// /tasks/{task_id}/status                          change status (PUT)
/// /tasks/{task_id}/comments                        index (PATCH), create
/// /tasks/{task_id}/comments/{id}                   update, delete (author only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/members", member::router())
        .nest("/task-statuses", task_status::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
}
