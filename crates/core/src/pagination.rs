//! Page/limit arithmetic and the `{ pagination, data }` response envelope.
//!
//! Index endpoints accept a 1-based `page` and a `limit`, translate them to
//! SQL `OFFSET`/`LIMIT` via [`PageRequest::skip`] and [`PageRequest::take`],
//! and answer with a [`Page`] whose [`Pagination`] block reports the total
//! record count and the resulting number of pages.

use serde::{Deserialize, Serialize};

/// Default page size when the caller omits `limit`.
pub const DEFAULT_LIMIT: i64 = 100;

/// Upper bound on page size.
pub const MAX_LIMIT: i64 = 1000;

/// A normalized page request. Construct via [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Normalize caller-supplied values: `page` floors at 1, `limit` defaults
    /// to [`DEFAULT_LIMIT`] and is clamped to `1..=MAX_LIMIT`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// Rows to skip (`OFFSET`).
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Rows to take (`LIMIT`).
    pub fn take(&self) -> i64 {
        self.limit
    }

    /// Wrap a fetched slice of rows and the total count into an envelope.
    pub fn paginate<T>(&self, records: i64, data: Vec<T>) -> Page<T> {
        Page {
            pagination: Pagination::new(self.page, self.limit, records),
            data,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned alongside every index response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current 1-based page.
    pub current: i64,
    /// Page size used for this response.
    pub limit: i64,
    /// Total number of matching records.
    pub records: i64,
    /// Total number of pages, `ceil(records / limit)`.
    pub pages: i64,
}

impl Pagination {
    pub fn new(current: i64, limit: i64, records: i64) -> Self {
        let records = records.max(0);
        let pages = if limit > 0 {
            (records + limit - 1) / limit
        } else {
            0
        };
        Self {
            current,
            limit,
            records,
            pages,
        }
    }
}

/// The standard `{ "pagination": ..., "data": [...] }` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Convert every row while keeping the pagination block.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            pagination: self.pagination,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
