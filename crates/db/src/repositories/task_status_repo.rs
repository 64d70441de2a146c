//! Repository for the `task_statuses` lookup table.

use chrono::Utc;
use sqlx::PgPool;
use tasklane_core::types::Id;

use crate::models::task_status::{CreateTaskStatus, TaskStatus, UpdateTaskStatus};

const COLUMNS: &str = "id, code, name, sort_order, created_at, updated_at";

pub struct TaskStatusRepo;

impl TaskStatusRepo {
    pub async fn create(pool: &PgPool, input: &CreateTaskStatus) -> Result<TaskStatus, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO task_statuses (id, code, name, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, COALESCE($4, 0), $5, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskStatus>(&query)
            .bind(Id::new_v4())
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.sort_order)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<TaskStatus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_statuses WHERE id = $1");
        sqlx::query_as::<_, TaskStatus>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The status new tasks start in: lowest `sort_order`, ties broken by code.
    pub async fn find_initial(pool: &PgPool) -> Result<Option<TaskStatus>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_statuses ORDER BY sort_order, code LIMIT 1"
        );
        sqlx::query_as::<_, TaskStatus>(&query)
            .fetch_optional(pool)
            .await
    }

    /// List the whole catalog in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<TaskStatus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_statuses ORDER BY sort_order, code");
        sqlx::query_as::<_, TaskStatus>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &UpdateTaskStatus,
    ) -> Result<Option<TaskStatus>, sqlx::Error> {
        let query = format!(
            "UPDATE task_statuses SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskStatus>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Number of tasks (including soft-deleted ones) pointing at this status.
    pub async fn count_references(pool: &PgPool, id: Id) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE status_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Permanently delete a status. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_statuses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
