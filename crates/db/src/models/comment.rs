//! Task comment model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tasklane_core::types::{Id, Timestamp};

/// A row from the `task_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskComment {
    pub id: Id,
    pub task_id: Id,
    pub author_id: Id,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateTaskComment {
    pub task_id: Id,
    pub author_id: Id,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskComment {
    pub body: Option<String>,
}
