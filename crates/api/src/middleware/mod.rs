//! Request extractors for caller identity and path parameters.
//!
//! - [`auth::MemberPayload`] -- The authenticated member from a JWT Bearer token.
//! - [`rbac::AdminPayload`] -- Requires the `admin` role.
//! - [`rbac::PmPayload`] -- Requires the `pm` role.
//! - [`rbac::DeveloperPayload`] -- Requires the `developer` role.
//! - [`rbac::ManagerPayload`] -- Requires `admin` or `pm`.
//! - [`path::IdPath`] -- UUID path parameters with JSON validation errors.

pub mod auth;
pub mod path;
pub mod rbac;
