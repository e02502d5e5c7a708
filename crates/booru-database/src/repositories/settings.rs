//! Application settings repository.

use sqlx::{PgExecutor, PgPool};

use booru_core::error::{AppError, ErrorKind};
use booru_core::result::AppResult;
use booru_entity::settings::AppSetting;

/// Repository for the `app_settings` key/value table.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The pool this repository reads from.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a boolean setting unless the key already exists, then return it.
    pub async fn ensure_bool(&self, key: &str, default: bool) -> AppResult<AppSetting> {
        self.insert_bool_if_missing(&self.pool, key, default).await?;

        self.find(key)
            .await?
            .ok_or_else(|| AppError::internal(format!("Setting '{key}' missing after seeding")))
    }

    /// Insert a boolean setting unless the key already exists.
    pub async fn insert_bool_if_missing<'e, E>(&self, executor: E, key: &str, value: bool) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("INSERT INTO app_settings (key, value_bool) VALUES ($1, $2) ON CONFLICT (key) DO NOTHING")
            .bind(key)
            .bind(value)
            .execute(executor)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed setting", e))?;
        Ok(())
    }

    /// Find a setting by key.
    pub async fn find(&self, key: &str) -> AppResult<Option<AppSetting>> {
        sqlx::query_as::<_, AppSetting>("SELECT * FROM app_settings WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find setting", e))
    }

    /// Read a setting with a row lock held until the transaction ends.
    pub async fn lock<'e, E>(&self, executor: E, key: &str) -> AppResult<Option<AppSetting>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, AppSetting>("SELECT * FROM app_settings WHERE key = $1 FOR UPDATE")
            .bind(key)
            .fetch_optional(executor)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock setting", e))
    }

    /// Write a boolean setting unconditionally.
    pub async fn set_bool<'e, E>(&self, executor: E, key: &str, value: bool) -> AppResult<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "INSERT INTO app_settings (key, value_bool) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value_bool = EXCLUDED.value_bool, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update setting", e))?;
        Ok(())
    }

    /// Compare-and-set a boolean setting. Returns the number of rows changed.
    pub async fn set_bool_if<'e, E>(
        &self,
        executor: E,
        key: &str,
        expected: bool,
        value: bool,
    ) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "UPDATE app_settings SET value_bool = $3, updated_at = NOW() \
             WHERE key = $1 AND COALESCE(value_bool, FALSE) = $2",
        )
        .bind(key)
        .bind(expected)
        .bind(value)
        .execute(executor)
        .await
        .map(|r| r.rows_affected())
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update setting", e))
    }

    /// All settings ordered by key.
    pub async fn list_all(&self) -> AppResult<Vec<AppSetting>> {
        sqlx::query_as::<_, AppSetting>("SELECT * FROM app_settings ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list settings", e))
    }
}
