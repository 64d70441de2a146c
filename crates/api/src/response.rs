//! Shared response envelope types for API handlers.
//!
//! Non-paginated collections use a `{ "data": [...] }` envelope. Paginated
//! indexes use [`tasklane_core::pagination::Page`] instead.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
