//! Role-based payload extractors.
//!
//! Each extractor wraps [`MemberPayload`] and rejects requests whose role does
//! not match. Handlers take one of these to state the role they serve.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tasklane_core::error::CoreError;
use tasklane_core::roles::Role;

use super::auth::MemberPayload;
use crate::error::AppError;
use crate::state::AppState;

/// Extract the member and check their role with `allowed`.
async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    allowed: impl Fn(Role) -> bool,
    message: &str,
) -> Result<MemberPayload, AppError> {
    let payload = MemberPayload::from_request_parts(parts, state).await?;
    if !allowed(payload.role) {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(payload)
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct AdminPayload(pub MemberPayload);

impl FromRequestParts<AppState> for AdminPayload {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, |role| role == Role::Admin, "Admin role required")
            .await
            .map(AdminPayload)
    }
}

/// Requires the `pm` role. Rejects with 403 Forbidden otherwise.
pub struct PmPayload(pub MemberPayload);

impl FromRequestParts<AppState> for PmPayload {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            |role| role == Role::Pm,
            "Project manager role required",
        )
        .await
        .map(PmPayload)
    }
}

/// Requires the `developer` role. Rejects with 403 Forbidden otherwise.
pub struct DeveloperPayload(pub MemberPayload);

impl FromRequestParts<AppState> for DeveloperPayload {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            |role| role == Role::Developer,
            "Developer role required",
        )
        .await
        .map(DeveloperPayload)
    }
}

/// Requires a role that [`Role::can_manage_projects`]. Used by every
/// project/task write.
pub struct ManagerPayload(pub MemberPayload);

impl FromRequestParts<AppState> for ManagerPayload {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            Role::can_manage_projects,
            "Project manager or Admin role required",
        )
        .await
        .map(ManagerPayload)
    }
}
