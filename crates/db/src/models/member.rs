//! Member entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tasklane_core::types::{Id, Timestamp};

/// Full member row from the `members` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`MemberResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Member {
    pub id: Id,
    pub email: String,
    pub name: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Safe member representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: Id,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            email: member.email,
            name: member.name,
            role: member.role,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// DTO for inserting a member. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub email: String,
    pub name: String,
    pub role: String,
    pub password_hash: String,
}

/// DTO for updating a member. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateMember {
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Filters for the member index.
#[derive(Debug, Clone, Default)]
pub struct MemberSearch {
    pub role: Option<String>,
    /// Case-insensitive substring match on name or email.
    pub search: Option<String>,
}
