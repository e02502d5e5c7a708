//! Admin role membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Marks a user as an administrator. At most one row per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    /// Row identifier.
    pub id: Uuid,
    /// The administrator.
    pub user_id: Uuid,
    /// When the role was granted.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}
