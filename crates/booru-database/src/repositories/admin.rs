//! Admin membership repository.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use booru_core::error::{AppError, ErrorKind};
use booru_core::result::AppResult;
use booru_entity::user::Admin;

use super::violated_constraint;

/// Repository for the `admins` table.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The pool this repository reads from.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Grant the admin role.
    ///
    /// A second grant for the same user is a conflict; an unknown user is
    /// not found.
    pub async fn create<'e, E>(&self, executor: E, user_id: Uuid) -> AppResult<Admin>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Admin>("INSERT INTO admins (user_id) VALUES ($1) RETURNING *")
            .bind(user_id)
            .fetch_one(executor)
            .await
            .map_err(|e| match violated_constraint(&e) {
                Some("admins_user_id_key") => AppError::conflict("Already an admin"),
                Some("admins_user_id_fkey") => AppError::not_found("User not found"),
                _ => AppError::with_source(ErrorKind::Database, "Failed to create admin", e),
            })
    }

    /// Revoke the admin role, returning the removed row if there was one.
    pub async fn delete_by_user_id<'e, E>(&self, executor: E, user_id: Uuid) -> AppResult<Option<Admin>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Admin>("DELETE FROM admins WHERE user_id = $1 RETURNING *")
            .bind(user_id)
            .fetch_optional(executor)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete admin", e))
    }

    /// Whether a live user holds the admin role.
    pub async fn exists(&self, user_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM admins a JOIN users u ON u.id = a.user_id \
             WHERE a.user_id = $1 AND u.deleted_at IS NULL)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check admin", e))
    }

    /// Number of admin rows.
    pub async fn count<'e, E>(&self, executor: E) -> AppResult<i64>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(executor)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count admins", e))
    }
}
