//! Route definitions for the `/members` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::member;
use crate::state::AppState;

/// Routes mounted at `/members`.
///
/// ```text
/// PATCH  /       -> index
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", patch(member::index)).route(
        "/{id}",
        get(member::get_by_id)
            .put(member::update)
            .delete(member::delete),
    )
}
