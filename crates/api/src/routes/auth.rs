//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /{role}/join   -> join
/// POST /{role}/login  -> login
/// POST /refresh       -> refresh
/// GET  /me            -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{role}/join", post(auth::join))
        .route("/{role}/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/me", get(auth::me))
}
