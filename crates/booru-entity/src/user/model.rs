//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::permission::PermissionLevel;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub name: String,
    /// Unique email address (optional unless enforced at sign-up).
    pub email: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker. Deleted users are invisible to normal queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A user together with its admin membership and permission mask.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserDetail {
    /// The account row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub user: User,
    /// Whether an admin row exists for this user.
    pub is_admin: bool,
    /// Stored permission mask, `None` when no permission row exists.
    pub permission: Option<PermissionLevel>,
}

impl UserDetail {
    /// Effective capability mask (empty without a permission row).
    pub fn permission_level(&self) -> PermissionLevel {
        self.permission.unwrap_or_default()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired login name.
    pub name: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Profile fields that may be changed after creation.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New login name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
}

impl UpdateUser {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
