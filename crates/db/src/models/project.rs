//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tasklane_core::types::{Id, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: Id,
    pub owner_id: Id,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub owner_id: Id,
    pub title: String,
    pub description: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Filters for the project index.
#[derive(Debug, Clone, Default)]
pub struct ProjectSearch {
    pub owner_id: Option<Id>,
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
}
