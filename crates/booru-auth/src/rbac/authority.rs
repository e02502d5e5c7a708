//! Sources of role and capability facts.

use async_trait::async_trait;
use uuid::Uuid;

use booru_core::result::AppResult;
use booru_database::repositories::{AdminRepository, PermissionRepository};
use booru_entity::permission::PermissionLevel;

/// Answers role and capability questions about a user.
#[async_trait]
pub trait AuthorityLookup: Send + Sync {
    /// Stored permission mask, `None` when the user has no row.
    async fn permission_level(&self, user_id: Uuid) -> AppResult<Option<PermissionLevel>>;

    /// Whether the user holds the admin role.
    async fn is_admin(&self, user_id: Uuid) -> AppResult<bool>;
}

/// [`AuthorityLookup`] backed by the `permissions` and `admins` tables.
#[derive(Debug, Clone)]
pub struct DatabaseAuthority {
    permissions: PermissionRepository,
    admins: AdminRepository,
}

impl DatabaseAuthority {
    /// Creates an authority over the given repositories.
    pub fn new(permissions: PermissionRepository, admins: AdminRepository) -> Self {
        Self { permissions, admins }
    }
}

#[async_trait]
impl AuthorityLookup for DatabaseAuthority {
    async fn permission_level(&self, user_id: Uuid) -> AppResult<Option<PermissionLevel>> {
        Ok(self
            .permissions
            .find_by_user_id(user_id)
            .await?
            .map(|p| p.permission))
    }

    async fn is_admin(&self, user_id: Uuid) -> AppResult<bool> {
        self.admins.exists(user_id).await
    }
}
