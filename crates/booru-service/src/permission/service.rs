//! Reading and setting a user's capability mask.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use booru_core::error::AppError;
use booru_core::result::AppResult;
use booru_database::repositories::{PermissionRepository, UserRepository};
use booru_entity::permission::{Permission, PermissionLevel};

/// Manages per-user permission masks.
#[derive(Debug, Clone)]
pub struct PermissionService {
    /// Permission repository.
    permissions: Arc<PermissionRepository>,
    /// User repository.
    users: Arc<UserRepository>,
}

impl PermissionService {
    /// Creates a new permission service.
    pub fn new(permissions: Arc<PermissionRepository>, users: Arc<UserRepository>) -> Self {
        Self { permissions, users }
    }

    /// Gets the permission row of a user.
    pub async fn get(&self, user_id: Uuid) -> AppResult<Permission> {
        self.permissions
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Permission not found"))
    }

    /// Effective mask of a user; empty without a row.
    pub async fn level(&self, user_id: Uuid) -> AppResult<PermissionLevel> {
        Ok(self
            .permissions
            .find_by_user_id(user_id)
            .await?
            .map(|p| p.permission)
            .unwrap_or_default())
    }

    /// Sets the mask of a live user, creating the row when missing.
    ///
    /// `raw` may only contain the known bits.
    pub async fn set(&self, user_id: Uuid, raw: i32) -> AppResult<Permission> {
        let level = PermissionLevel::try_from_raw(raw)?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }

        let permission = self
            .permissions
            .upsert(self.permissions.pool(), user_id, level)
            .await?;
        info!(user_id = %user_id, permission = level.raw(), "Permission set");
        Ok(permission)
    }
}
