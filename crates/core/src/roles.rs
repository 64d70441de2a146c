//! Well-known role names.
//!
//! These must match the CHECK constraint on `members.role` in
//! `20260101000001_create_members_table.sql`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PM: &str = "pm";
pub const ROLE_DEVELOPER: &str = "developer";

/// A member's role, as carried in JWT claims and the `members.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Pm,
    Developer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Pm, Role::Developer];

    /// Parse a role name. Returns `None` for anything that is not an exact match.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_PM => Some(Role::Pm),
            ROLE_DEVELOPER => Some(Role::Developer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Pm => ROLE_PM,
            Role::Developer => ROLE_DEVELOPER,
        }
    }

    /// Admins and project managers may create and own projects.
    pub fn can_manage_projects(self) -> bool {
        matches!(self, Role::Admin | Role::Pm)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
