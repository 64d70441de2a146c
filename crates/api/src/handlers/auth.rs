//! Handlers for the `/auth` resource (join, login, refresh, me).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tasklane_core::error::CoreError;
use tasklane_core::roles::Role;
use tasklane_core::validation::{normalize_email, not_blank};
use tasklane_db::models::member::{CreateMember, Member, MemberResponse};
use tasklane_db::repositories::MemberRepo;
use validator::Validate;

use crate::auth::jwt::{issue_token_bundle, validate_token, TokenBundle, TokenKind};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MemberPayload;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/{role}/join`.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub name: String,
    pub password: String,
}

/// Request body for `POST /auth/{role}/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by join, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub member: MemberResponse,
    pub token: TokenBundle,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/{role}/join
///
/// Register a new member with the role named in the path. Returns the member
/// and a fresh token bundle with 201 Created.
pub async fn join(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(mut input): Json<JoinRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let role = parse_role(&role)?;
    if !state.config.can_self_join(role) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Self-registration is disabled for role '{role}'"
        ))));
    }

    input.email = normalize_email(&input.email);
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateMember {
        email: input.email,
        name: input.name.trim().to_string(),
        role: role.as_str().to_string(),
        password_hash,
    };

    // A taken email surfaces as a `uq_members_email` violation (409).
    let member = MemberRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(member_id = %member.id, %role, "Member joined");

    let response = auth_response(&state, member, role)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/{role}/login
///
/// Authenticate with email + password among live members holding `role`.
pub async fn login(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let role = parse_role(&role)?;
    let email = normalize_email(&input.email);

    let Some(member) =
        MemberRepo::find_by_email_and_role(&state.pool, &email, role.as_str()).await?
    else {
        tracing::warn!(%email, %role, "Login for unknown member");
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&input.password, &member.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::warn!(member_id = %member.id, %role, "Login with wrong password");
        return Err(invalid_credentials());
    }

    let response = auth_response(&state, member, role)?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new token bundle. The role in the new
/// tokens is re-read from the member row.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let claims = validate_token(&input.refresh_token, TokenKind::Refresh, &state.config.jwt)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected refresh token");
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let member = MemberRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Member no longer exists".into()))
        })?;

    let role = member_role(&member)?;
    let response = auth_response(&state, member, role)?;
    Ok(Json(response))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    payload: MemberPayload,
) -> AppResult<Json<MemberResponse>> {
    let member = MemberRepo::find_by_id(&state.pool, payload.member_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id: payload.member_id,
        }))?;
    Ok(Json(member.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_role(name: &str) -> AppResult<Role> {
    Role::parse(name).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("Unknown role '{name}'")))
    })
}

/// Resolve the stored role column. The CHECK constraint keeps this infallible
/// in practice.
pub(crate) fn member_role(member: &Member) -> AppResult<Role> {
    Role::parse(&member.role).ok_or_else(|| {
        AppError::InternalError(format!(
            "Member {} has unknown role '{}'",
            member.id, member.role
        ))
    })
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

/// Issue a token bundle for `member` and pair it with the member DTO.
fn auth_response(state: &AppState, member: Member, role: Role) -> AppResult<AuthResponse> {
    let token = issue_token_bundle(member.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        member: member.into(),
        token,
    })
}
