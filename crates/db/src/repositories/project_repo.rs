//! Repository for the `projects` table.

use chrono::Utc;
use sqlx::PgPool;
use tasklane_core::pagination::PageRequest;
use tasklane_core::types::Id;

use super::like_pattern;
use crate::models::project::{CreateProject, Project, ProjectSearch, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, description, created_at, updated_at";

/// `$1` owner id, `$2` title pattern.
const SEARCH_FILTER: &str = "deleted_at IS NULL
    AND ($1::uuid IS NULL OR owner_id = $1)
    AND ($2::text IS NULL OR title ILIKE $2)";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO projects (id, owner_id, title, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(Id::new_v4())
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a project by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ProjectSearch) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM projects WHERE {SEARCH_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.owner_id)
            .bind(like_pattern(filter.search.as_deref()))
            .fetch_one(pool)
            .await
    }

    /// List one page of projects ordered by most recently created first.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectSearch,
        page: &PageRequest,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE {SEARCH_FILTER}
             ORDER BY created_at DESC, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.owner_id)
            .bind(like_pattern(filter.search.as_deref()))
            .bind(page.take())
            .bind(page.skip())
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a project by id. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
