//! Task status catalog model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tasklane_core::types::{Id, Timestamp};

/// A row from the `task_statuses` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskStatus {
    pub id: Id,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateTaskStatus {
    pub code: String,
    pub name: String,
    /// Defaults to 0 if omitted.
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskStatus {
    pub code: Option<String>,
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}
