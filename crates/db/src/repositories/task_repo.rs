//! Repository for the `tasks` table.

use chrono::Utc;
use sqlx::PgPool;
use tasklane_core::pagination::PageRequest;
use tasklane_core::types::Id;

use super::like_pattern;
use crate::models::task::{CreateTask, Task, TaskSearch, UpdateTask, DEFAULT_PRIORITY};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, status_id, creator_id, assignee_id, title, \
                       description, priority, due_at, created_at, updated_at";

/// `$1` project, `$2` status, `$3` assignee, `$4` title pattern.
/// Tasks of soft-deleted projects never match.
const SEARCH_FILTER: &str = "deleted_at IS NULL
    AND ($1::uuid IS NULL OR project_id = $1)
    AND ($2::uuid IS NULL OR status_id = $2)
    AND ($3::uuid IS NULL OR assignee_id = $3)
    AND ($4::text IS NULL OR title ILIKE $4)
    AND EXISTS (SELECT 1 FROM projects p
                WHERE p.id = tasks.project_id AND p.deleted_at IS NULL)";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO tasks (id, project_id, status_id, creator_id, assignee_id, title,
                                description, priority, due_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(Id::new_v4())
            .bind(input.project_id)
            .bind(input.status_id)
            .bind(input.creator_id)
            .bind(input.assignee_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority.unwrap_or(DEFAULT_PRIORITY))
            .bind(input.due_at)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a task by id. Excludes soft-deleted tasks and tasks whose
    /// project has been soft-deleted.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE id = $1 AND deleted_at IS NULL
               AND EXISTS (SELECT 1 FROM projects p
                           WHERE p.id = tasks.project_id AND p.deleted_at IS NULL)"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live task by id, scoped to the given project.
    pub async fn find_in_project(
        pool: &PgPool,
        project_id: Id,
        id: Id,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE id = $1 AND project_id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &TaskSearch) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM tasks WHERE {SEARCH_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.project_id)
            .bind(filter.status_id)
            .bind(filter.assignee_id)
            .bind(like_pattern(filter.search.as_deref()))
            .fetch_one(pool)
            .await
    }

    /// List one page of tasks: highest priority first, then earliest due date.
    pub async fn list(
        pool: &PgPool,
        filter: &TaskSearch,
        page: &PageRequest,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE {SEARCH_FILTER}
             ORDER BY priority DESC, due_at ASC NULLS LAST, created_at DESC, id
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(filter.project_id)
            .bind(filter.status_id)
            .bind(filter.assignee_id)
            .bind(like_pattern(filter.search.as_deref()))
            .bind(page.take())
            .bind(page.skip())
            .fetch_all(pool)
            .await
    }

    /// Number of live tasks in a project.
    pub async fn count_in_project(pool: &PgPool, project_id: Id) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE project_id = $1 AND deleted_at IS NULL",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                status_id = COALESCE($2, status_id),
                assignee_id = COALESCE($3, assignee_id),
                title = COALESCE($4, title),
                description = COALESCE($5, description),
                priority = COALESCE($6, priority),
                due_at = COALESCE($7, due_at),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(input.status_id)
            .bind(input.assignee_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.due_at)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a task by id. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
