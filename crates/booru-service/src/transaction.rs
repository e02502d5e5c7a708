//! Transaction helpers.

use sqlx::{PgPool, Postgres, Transaction};

use booru_core::error::{AppError, ErrorKind};
use booru_core::result::AppResult;

/// Opens a transaction on the pool.
pub async fn begin(pool: &PgPool) -> AppResult<Transaction<'static, Postgres>> {
    pool.begin()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))
}

/// Commits a transaction. Dropping one without committing rolls it back.
pub async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
}
