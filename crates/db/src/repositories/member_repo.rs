//! Repository for the `members` table.

use chrono::Utc;
use sqlx::PgPool;
use tasklane_core::pagination::PageRequest;
use tasklane_core::types::Id;

use super::like_pattern;
use crate::models::member::{CreateMember, Member, MemberSearch, UpdateMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, name, role, password_hash, created_at, updated_at, deleted_at";

/// Shared `WHERE` clause for the member index: `$1` role, `$2` search pattern.
const SEARCH_FILTER: &str = "deleted_at IS NULL
    AND ($1::text IS NULL OR role = $1)
    AND ($2::text IS NULL OR name ILIKE $2 OR email ILIKE $2)";

/// Provides CRUD operations for members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member with a freshly generated id, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<Member, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO members (id, email, name, role, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(Id::new_v4())
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.password_hash)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a member by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live member by email (case-insensitive) holding the given role.
    pub async fn find_by_email_and_role(
        pool: &PgPool,
        email: &str,
        role: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM members
             WHERE lower(email) = lower($1) AND role = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(email)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Count live members matching the filters.
    pub async fn count(pool: &PgPool, filter: &MemberSearch) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM members WHERE {SEARCH_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.role)
            .bind(like_pattern(filter.search.as_deref()))
            .fetch_one(pool)
            .await
    }

    /// List one page of live members, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &MemberSearch,
        page: &PageRequest,
    ) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM members WHERE {SEARCH_FILTER}
             ORDER BY created_at DESC, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&filter.role)
            .bind(like_pattern(filter.search.as_deref()))
            .bind(page.take())
            .bind(page.skip())
            .fetch_all(pool)
            .await
    }

    /// Update a member. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &UpdateMember,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a member by id. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE members SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
