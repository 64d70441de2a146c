//! Repository for the `task_comments` table.

use chrono::Utc;
use sqlx::PgPool;
use tasklane_core::pagination::PageRequest;
use tasklane_core::types::Id;

use crate::models::comment::{CreateTaskComment, TaskComment, UpdateTaskComment};

const COLUMNS: &str = "id, task_id, author_id, body, created_at, updated_at";

pub struct TaskCommentRepo;

impl TaskCommentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTaskComment,
    ) -> Result<TaskComment, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO task_comments (id, task_id, author_id, body, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(Id::new_v4())
            .bind(input.task_id)
            .bind(input.author_id)
            .bind(&input.body)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by id, scoped to its task.
    pub async fn find_in_task(
        pool: &PgPool,
        task_id: Id,
        id: Id,
    ) -> Result<Option<TaskComment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_comments WHERE id = $1 AND task_id = $2");
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(id)
            .bind(task_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_for_task(pool: &PgPool, task_id: Id) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM task_comments WHERE task_id = $1")
            .bind(task_id)
            .fetch_one(pool)
            .await
    }

    /// List one page of a task's comments, oldest first.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: Id,
        page: &PageRequest,
    ) -> Result<Vec<TaskComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_comments WHERE task_id = $1
             ORDER BY created_at ASC, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(task_id)
            .bind(page.take())
            .bind(page.skip())
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &UpdateTaskComment,
    ) -> Result<Option<TaskComment>, sqlx::Error> {
        let query = format!(
            "UPDATE task_comments SET
                body = COALESCE($2, body),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(id)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
