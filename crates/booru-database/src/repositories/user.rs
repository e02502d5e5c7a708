//! User repository implementation.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use booru_core::error::{AppError, ErrorKind};
use booru_core::result::AppResult;
use booru_core::types::{PageWindow, SortField};
use booru_entity::user::{CreateUser, UpdateUser, User, UserDetail};

use super::violated_constraint;

/// Columns a user listing may be sorted by.
pub const USER_SORT_COLUMNS: &[&str] = &["name", "email", "created_at", "updated_at"];
/// Ordering applied when a listing does not ask for one.
pub const USER_DEFAULT_SORT: SortField = SortField::asc("name");

const DETAIL_SELECT: &str = "SELECT u.*, (a.id IS NOT NULL) AS is_admin, p.permission AS permission \
     FROM users u \
     LEFT JOIN admins a ON a.user_id = u.id \
     LEFT JOIN permissions p ON p.user_id = u.id";

const LIST_FILTER: &str = "WHERE u.deleted_at IS NULL AND u.name ILIKE $1 \
     AND ($2 = FALSE OR a.id IS NOT NULL)";

/// Repository for user CRUD and query operations.
///
/// Soft-deleted users are excluded from every lookup.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The pool this repository reads from.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find a live user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a live user with admin flag and permission mask.
    pub async fn find_detail_by_id(&self, id: Uuid) -> AppResult<Option<UserDetail>> {
        sqlx::query_as::<_, UserDetail>(&format!(
            "{DETAIL_SELECT} WHERE u.id = $1 AND u.deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user detail", e))
    }

    /// Find a live user whose name or email equals `login`.
    pub async fn find_by_name_or_email(&self, login: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE (name = $1 OR email = $1) AND deleted_at IS NULL \
             ORDER BY (name = $1) DESC LIMIT 1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by login", e))
    }

    /// List live users whose name contains the keyword pattern.
    ///
    /// Returns the window of rows and the total number of matches.
    pub async fn list(
        &self,
        pattern: &str,
        admins_only: bool,
        sort: SortField,
        window: PageWindow,
    ) -> AppResult<(Vec<UserDetail>, i64)> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM users u LEFT JOIN admins a ON a.user_id = u.id {LIST_FILTER}"
        ))
        .bind(pattern)
        .bind(admins_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = sqlx::query_as::<_, UserDetail>(&format!(
            "{DETAIL_SELECT} {LIST_FILTER} ORDER BY {}, u.id LIMIT $3 OFFSET $4",
            sort.to_sql(Some("u"))
        ))
        .bind(pattern)
        .bind(admins_only)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok((users, total))
    }

    /// Create a new user.
    pub async fn create<'e, E>(&self, executor: E, data: &CreateUser) -> AppResult<User>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("users_name_key") => {
                AppError::conflict(format!("Name '{}' is already taken", data.name))
            }
            Some("users_email_key") => AppError::conflict("Email is already registered"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update profile fields. `None` fields keep their value.
    pub async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), email = COALESCE($3, email), \
             updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("users_name_key") => AppError::conflict("Name is already taken"),
            Some("users_email_key") => AppError::conflict("Email is already registered"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to update user", e),
        })?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Replace the stored password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }
        Ok(())
    }

    /// Mark a live user as deleted. Returns the number of rows changed.
    pub async fn soft_delete<'e, E>(&self, executor: E, id: Uuid) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(executor)
        .await
        .map(|r| r.rows_affected())
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))
    }
}
