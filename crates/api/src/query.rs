//! Shared request-body types for index endpoints.

use serde::Deserialize;
use tasklane_core::pagination::PageRequest;

/// Pagination fields accepted by every index body (`{ "page": 2, "limit": 20 }`).
///
/// Flattened into the per-resource index request. Values are normalized by
/// [`PageRequest::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}
