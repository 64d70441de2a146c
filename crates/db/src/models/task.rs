//! Task entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tasklane_core::types::{Id, Timestamp};

/// Priority assigned when the caller omits one.
pub const DEFAULT_PRIORITY: i16 = 3;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: Id,
    pub project_id: Id,
    pub status_id: Id,
    pub creator_id: Id,
    pub assignee_id: Option<Id>,
    pub title: String,
    pub description: Option<String>,
    pub priority: i16,
    pub due_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub project_id: Id,
    pub status_id: Id,
    pub creator_id: Id,
    pub assignee_id: Option<Id>,
    pub title: String,
    pub description: Option<String>,
    /// Defaults to [`DEFAULT_PRIORITY`] if omitted.
    pub priority: Option<i16>,
    pub due_at: Option<Timestamp>,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub status_id: Option<Id>,
    pub assignee_id: Option<Id>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i16>,
    pub due_at: Option<Timestamp>,
}

/// Filters for task indexes. `project_id` and `assignee_id` scope the
/// listing; `status_id` and `search` narrow it further.
#[derive(Debug, Clone, Default)]
pub struct TaskSearch {
    pub project_id: Option<Id>,
    pub status_id: Option<Id>,
    pub assignee_id: Option<Id>,
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
}
