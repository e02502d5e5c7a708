//! Permission row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::level::PermissionLevel;

/// Stored capability mask of one user. No row means no capabilities.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Owner of the mask.
    pub user_id: Uuid,
    /// Capability mask.
    pub permission: PermissionLevel,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the mask last changed.
    pub updated_at: DateTime<Utc>,
}
