//! Route definitions for the `/task-statuses` catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::task_status;
use crate::state::AppState;

/// Routes mounted at `/task-statuses`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task_status::list).post(task_status::create))
        .route(
            "/{id}",
            get(task_status::get_by_id)
                .put(task_status::update)
                .delete(task_status::delete),
        )
}
