//! Tag category repository.

use sqlx::PgPool;
use uuid::Uuid;

use booru_core::error::{AppError, ErrorKind};
use booru_core::result::AppResult;
use booru_core::types::{PageWindow, SortField};
use booru_entity::tag::{CreateTagCategory, TagCategory, UpdateTagCategory};

use super::violated_constraint;

/// Columns a category listing may be sorted by.
pub const CATEGORY_SORT_COLUMNS: &[&str] = &["slug", "name", "created_at", "updated_at"];
/// Ordering applied when a listing does not ask for one.
pub const CATEGORY_DEFAULT_SORT: SortField = SortField::asc("slug");

/// Repository for the `tag_categories` table.
#[derive(Debug, Clone)]
pub struct TagCategoryRepository {
    pool: PgPool,
}

impl TagCategoryRepository {
    /// Create a new tag category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The pool this repository reads from.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find a live category by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TagCategory>> {
        sqlx::query_as::<_, TagCategory>(
            "SELECT * FROM tag_categories WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag category", e))
    }

    /// List live categories whose slug matches the pattern.
    pub async fn list(
        &self,
        pattern: &str,
        sort: SortField,
        window: PageWindow,
    ) -> AppResult<(Vec<TagCategory>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tag_categories c WHERE c.deleted_at IS NULL AND c.slug ILIKE $1",
        )
        .bind(pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tag categories", e))?;

        let rows = sqlx::query_as::<_, TagCategory>(&format!(
            "SELECT c.* FROM tag_categories c WHERE c.deleted_at IS NULL AND c.slug ILIKE $1 \
             ORDER BY {}, c.id LIMIT $2 OFFSET $3",
            sort.to_sql(Some("c"))
        ))
        .bind(pattern)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tag categories", e))?;

        Ok((rows, total))
    }

    /// Create a category.
    pub async fn create(&self, data: &CreateTagCategory) -> AppResult<TagCategory> {
        sqlx::query_as::<_, TagCategory>(
            "INSERT INTO tag_categories (slug, name, created_by, updated_by) \
             VALUES ($1, $2, $3, $3) RETURNING *",
        )
        .bind(&data.slug)
        .bind(&data.name)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("tag_categories_slug_key") => {
                AppError::conflict(format!("Tag category '{}' already exists", data.slug))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create tag category", e),
        })
    }

    /// Update a live category. `None` fields keep their value.
    pub async fn update(&self, data: &UpdateTagCategory) -> AppResult<TagCategory> {
        sqlx::query_as::<_, TagCategory>(
            "UPDATE tag_categories SET slug = COALESCE($2, slug), name = COALESCE($3, name), \
             updated_by = $4, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(data.id)
        .bind(&data.slug)
        .bind(&data.name)
        .bind(data.updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("tag_categories_slug_key") => AppError::conflict("Tag category slug already exists"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to update tag category", e),
        })?
        .ok_or_else(|| AppError::not_found("Tag category not found"))
    }

    /// Soft delete a live category.
    pub async fn soft_delete(&self, id: Uuid, deleted_by: Uuid) -> AppResult<TagCategory> {
        sqlx::query_as::<_, TagCategory>(
            "UPDATE tag_categories SET deleted_at = NOW(), deleted_by = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(deleted_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag category", e))?
        .ok_or_else(|| AppError::not_found("Tag category not found"))
    }
}
