//! Route definitions for the `/tasks` resource.
//!
//! Also nests comment routes under `/tasks/{task_id}/comments`.

use axum::routing::{patch, put};
use axum::Router;

use crate::handlers::{comment, task};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// PATCH  /assigned                          -> task::assigned
/// PUT    /{task_id}/status                  -> task::change_status
///
/// PATCH  /{task_id}/comments                -> comment::index
/// POST   /{task_id}/comments                -> comment::create
/// PUT    /{task_id}/comments/{id}           -> comment::update
/// DELETE /{task_id}/comments/{id}           -> comment::delete
/// ```
pub fn router() -> Router<AppState> {
    let comment_routes = Router::new()
        .route("/", patch(comment::index).post(comment::create))
        .route("/{id}", put(comment::update).delete(comment::delete));

    Router::new()
        .route("/assigned", patch(task::assigned))
        .route("/{task_id}/status", put(task::change_status))
        .nest("/{task_id}/comments", comment_routes)
}
