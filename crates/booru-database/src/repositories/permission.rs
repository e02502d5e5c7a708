//! Permission mask repository.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use booru_core::error::{AppError, ErrorKind};
use booru_core::result::AppResult;
use booru_entity::permission::{Permission, PermissionLevel};

use super::violated_constraint;

/// Repository for the `permissions` table. One row per user at most.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The pool this repository reads from.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find the permission row of a user.
    pub async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find permission", e))
    }

    /// Insert the initial permission row of a user.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        level: PermissionLevel,
    ) -> AppResult<Permission>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Permission>(
            "INSERT INTO permissions (user_id, permission) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(level)
        .fetch_one(executor)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("permissions_pkey") => AppError::conflict("Permission already exists"),
            Some("permissions_user_id_fkey") => AppError::not_found("User not found"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create permission", e),
        })
    }

    /// Set the mask of a user, creating the row when missing.
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        level: PermissionLevel,
    ) -> AppResult<Permission>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Permission>(
            "INSERT INTO permissions (user_id, permission) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET permission = EXCLUDED.permission, updated_at = NOW() \
             RETURNING *",
        )
        .bind(user_id)
        .bind(level)
        .fetch_one(executor)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("permissions_user_id_fkey") => AppError::not_found("User not found"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to set permission", e),
        })
    }

    /// Remove the permission row of a user. Returns the number of rows removed.
    pub async fn delete_by_user_id<'e, E>(&self, executor: E, user_id: Uuid) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("DELETE FROM permissions WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete permission", e))
    }
}
