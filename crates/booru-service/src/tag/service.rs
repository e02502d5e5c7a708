//! Tag service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use booru_core::error::AppError;
use booru_core::result::AppResult;
use booru_core::types::{Page, PageQuery, SortField};
use booru_database::repositories::tag::{TAG_DEFAULT_SORT, TAG_SORT_COLUMNS};
use booru_database::repositories::{TagCategoryRepository, TagRepository};
use booru_entity::tag::{CreateTag, TagDetail, UpdateTag};

use super::{display_name, normalize_slug};
use crate::context::RequestContext;

/// Submitted tag fields.
#[derive(Debug, Clone, Default)]
pub struct TagInput {
    /// Raw slug, normalised before storage.
    pub slug: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Owning category.
    pub category_id: Option<Uuid>,
}

/// Manages tags.
#[derive(Debug, Clone)]
pub struct TagService {
    /// Tag repository.
    tags: Arc<TagRepository>,
    /// Category repository, to check the owning category is live.
    categories: Arc<TagCategoryRepository>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tags: Arc<TagRepository>, categories: Arc<TagCategoryRepository>) -> Self {
        Self { tags, categories }
    }

    /// Pages through live tags, optionally within one category.
    pub async fn list(
        &self,
        query: &PageQuery,
        category_id: Option<Uuid>,
    ) -> AppResult<Page<TagDetail>> {
        let window = query.window()?;
        let sort = SortField::parse(query.sort.as_deref(), TAG_SORT_COLUMNS, TAG_DEFAULT_SORT)?;
        let (rows, total) = self
            .tags
            .list(&query.keyword_pattern(), category_id, sort, window)
            .await?;
        Ok(Page::new(rows, window, total))
    }

    /// Gets a live tag with its category.
    pub async fn get(&self, id: Uuid) -> AppResult<TagDetail> {
        self.tags
            .find_detail_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found"))
    }

    /// Gets the live tags carrying a slug, one per category.
    pub async fn get_by_slug(&self, raw: &str) -> AppResult<Vec<TagDetail>> {
        let slug = normalize_slug(raw)?;
        let tags = self.tags.find_by_slug(&slug).await?;
        if tags.is_empty() {
            return Err(AppError::not_found("Tag not found"));
        }
        Ok(tags)
    }

    /// Creates a tag in a live category.
    pub async fn create(&self, ctx: &RequestContext, input: TagInput) -> AppResult<TagDetail> {
        let raw = input
            .slug
            .ok_or_else(|| AppError::validation("Slug is required"))?;
        let category_id = input
            .category_id
            .ok_or_else(|| AppError::validation("Category is required"))?;
        self.ensure_category(category_id).await?;

        let data = CreateTag {
            slug: normalize_slug(&raw)?,
            name: display_name(input.name.as_deref(), &raw),
            category_id,
            created_by: ctx.user_id,
        };

        let tag = self.tags.create(&data).await?;
        info!(tag_id = %tag.id, slug = %tag.slug, user_id = %ctx.user_id, "Tag created");
        self.get(tag.id).await
    }

    /// Updates a tag. Absent fields keep their value.
    pub async fn update(&self, ctx: &RequestContext, id: Uuid, input: TagInput) -> AppResult<TagDetail> {
        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
        }

        let data = UpdateTag {
            id,
            slug: input.slug.as_deref().map(normalize_slug).transpose()?,
            name: input.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            category_id: input.category_id,
            updated_by: ctx.user_id,
        };

        self.tags.update(&data).await?;
        info!(tag_id = %id, user_id = %ctx.user_id, "Tag updated");
        self.get(id).await
    }

    /// Soft deletes a tag.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.tags.soft_delete(id, ctx.user_id).await?;
        info!(tag_id = %id, user_id = %ctx.user_id, "Tag deleted");
        Ok(())
    }

    async fn ensure_category(&self, category_id: Uuid) -> AppResult<()> {
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(AppError::not_found("Tag category not found"));
        }
        Ok(())
    }
}
