//! Tag repository.

use sqlx::PgPool;
use uuid::Uuid;

use booru_core::error::{AppError, ErrorKind};
use booru_core::result::AppResult;
use booru_core::types::{PageWindow, SortField};
use booru_entity::tag::{CreateTag, Tag, TagDetail, UpdateTag};

use super::violated_constraint;

/// Columns a tag listing may be sorted by.
pub const TAG_SORT_COLUMNS: &[&str] = &["slug", "name", "created_at", "updated_at"];
/// Ordering applied when a listing does not ask for one.
pub const TAG_DEFAULT_SORT: SortField = SortField::asc("slug");

const DETAIL_SELECT: &str = "SELECT t.*, c.slug AS category_slug, c.name AS category_name \
     FROM tags t JOIN tag_categories c ON c.id = t.category_id";

const LIST_FILTER: &str = "WHERE t.deleted_at IS NULL AND t.slug ILIKE $1 \
     AND ($2::uuid IS NULL OR t.category_id = $2)";

/// Repository for the `tags` table.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The pool this repository reads from.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find a live tag by id, with its category.
    pub async fn find_detail_by_id(&self, id: Uuid) -> AppResult<Option<TagDetail>> {
        sqlx::query_as::<_, TagDetail>(&format!(
            "{DETAIL_SELECT} WHERE t.id = $1 AND t.deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag", e))
    }

    /// Find live tags with the given slug in any category.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Vec<TagDetail>> {
        sqlx::query_as::<_, TagDetail>(&format!(
            "{DETAIL_SELECT} WHERE t.slug = $1 AND t.deleted_at IS NULL ORDER BY c.slug"
        ))
        .bind(slug)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag by slug", e))
    }

    /// List live tags whose slug matches the pattern, optionally within
    /// one category.
    pub async fn list(
        &self,
        pattern: &str,
        category_id: Option<Uuid>,
        sort: SortField,
        window: PageWindow,
    ) -> AppResult<(Vec<TagDetail>, i64)> {
        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM tags t {LIST_FILTER}"))
            .bind(pattern)
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tags", e))?;

        let rows = sqlx::query_as::<_, TagDetail>(&format!(
            "{DETAIL_SELECT} {LIST_FILTER} ORDER BY {}, t.id LIMIT $3 OFFSET $4",
            sort.to_sql(Some("t"))
        ))
        .bind(pattern)
        .bind(category_id)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))?;

        Ok((rows, total))
    }

    /// Create a tag.
    pub async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (slug, name, category_id, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $4) RETURNING *",
        )
        .bind(&data.slug)
        .bind(&data.name)
        .bind(data.category_id)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("tags_slug_category_id_key") => {
                AppError::conflict(format!("Tag '{}' already exists in this category", data.slug))
            }
            Some("tags_category_id_fkey") => AppError::not_found("Tag category not found"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create tag", e),
        })
    }

    /// Update a live tag. `None` fields keep their value.
    pub async fn update(&self, data: &UpdateTag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET slug = COALESCE($2, slug), name = COALESCE($3, name), \
             category_id = COALESCE($4, category_id), updated_by = $5, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(data.id)
        .bind(&data.slug)
        .bind(&data.name)
        .bind(data.category_id)
        .bind(data.updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("tags_slug_category_id_key") => {
                AppError::conflict("Tag already exists in this category")
            }
            Some("tags_category_id_fkey") => AppError::not_found("Tag category not found"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to update tag", e),
        })?
        .ok_or_else(|| AppError::not_found("Tag not found"))
    }

    /// Soft delete a live tag.
    pub async fn soft_delete(&self, id: Uuid, deleted_by: Uuid) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET deleted_at = NOW(), deleted_by = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(deleted_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag", e))?
        .ok_or_else(|| AppError::not_found("Tag not found"))
    }
}
