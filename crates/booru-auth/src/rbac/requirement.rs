//! What a route demands of its caller.

use std::fmt;

use booru_entity::permission::PermissionLevel;

/// A guard condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any valid bearer token.
    Authenticated,
    /// A token whose user holds at least one of these capabilities.
    Permission(PermissionLevel),
    /// A token whose user holds the admin role.
    Admin,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => write!(f, "authenticated"),
            Self::Permission(level) => write!(f, "permission {}", level.names().join("|")),
            Self::Admin => write!(f, "admin"),
        }
    }
}
