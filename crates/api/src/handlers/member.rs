//! Handlers for the `/members` resource.
//!
//! All handlers require the `admin` role via [`AdminPayload`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tasklane_core::error::CoreError;
use tasklane_core::pagination::Page;
use tasklane_core::roles::Role;
use tasklane_core::types::Id;
use tasklane_core::validation::not_blank;
use tasklane_db::models::member::{MemberResponse, MemberSearch, UpdateMember};
use tasklane_db::repositories::MemberRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::path::IdPath;
use crate::middleware::rbac::AdminPayload;
use crate::query::PageParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /members`.
#[derive(Debug, Default, Deserialize)]
pub struct MemberIndexRequest {
    #[serde(flatten)]
    pub page: PageParams,
    pub role: Option<Role>,
    /// Substring of the name or email.
    pub search: Option<String>,
}

/// Request body for `PUT /members/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub name: Option<String>,
    pub role: Option<Role>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// PATCH /api/v1/members
pub async fn index(
    State(state): State<AppState>,
    AdminPayload(_admin): AdminPayload,
    Json(input): Json<MemberIndexRequest>,
) -> AppResult<Json<Page<MemberResponse>>> {
    let page = input.page.to_request();
    let filter = MemberSearch {
        role: input.role.map(|r| r.as_str().to_string()),
        search: input.search,
    };

    let (records, members) = tokio::try_join!(
        MemberRepo::count(&state.pool, &filter),
        MemberRepo::list(&state.pool, &filter, &page),
    )?;

    Ok(Json(page.paginate(records, members).map(MemberResponse::from)))
}

/// GET /api/v1/members/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AdminPayload(_admin): AdminPayload,
    IdPath(id): IdPath<Id>,
) -> AppResult<Json<MemberResponse>> {
    let member = MemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))?;
    Ok(Json(member.into()))
}

/// PUT /api/v1/members/{id}
///
/// Rename a member or change their role. Tokens already issued keep the old
/// role until they are refreshed.
pub async fn update(
    State(state): State<AppState>,
    AdminPayload(admin): AdminPayload,
    IdPath(id): IdPath<Id>,
    Json(input): Json<UpdateMemberRequest>,
) -> AppResult<Json<MemberResponse>> {
    input.validate()?;

    let update_dto = UpdateMember {
        name: input.name.map(|n| n.trim().to_string()),
        role: input.role.map(|r| r.as_str().to_string()),
    };

    let member = MemberRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))?;

    tracing::info!(member_id = %id, admin_id = %admin.member_id, "Member updated");
    Ok(Json(member.into()))
}

/// DELETE /api/v1/members/{id}
///
/// Soft-delete a member. An admin cannot delete their own account.
pub async fn delete(
    State(state): State<AppState>,
    AdminPayload(admin): AdminPayload,
    IdPath(id): IdPath<Id>,
) -> AppResult<StatusCode> {
    if id == admin.member_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot delete your own account".into(),
        )));
    }

    let deleted = MemberRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(member_id = %id, admin_id = %admin.member_id, "Member deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))
    }
}
