//! Tag category service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use booru_core::error::AppError;
use booru_core::result::AppResult;
use booru_core::types::{Page, PageQuery, SortField};
use booru_database::repositories::TagCategoryRepository;
use booru_database::repositories::tag_category::{CATEGORY_DEFAULT_SORT, CATEGORY_SORT_COLUMNS};
use booru_entity::tag::{CreateTagCategory, TagCategory, UpdateTagCategory};

use super::{display_name, normalize_slug};
use crate::context::RequestContext;

/// Submitted category fields.
#[derive(Debug, Clone, Default)]
pub struct CategoryInput {
    /// Raw slug, normalised before storage.
    pub slug: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

/// Manages tag categories.
#[derive(Debug, Clone)]
pub struct TagCategoryService {
    /// Category repository.
    repo: Arc<TagCategoryRepository>,
}

impl TagCategoryService {
    /// Creates a new tag category service.
    pub fn new(repo: Arc<TagCategoryRepository>) -> Self {
        Self { repo }
    }

    /// Pages through live categories, matching keywords against the slug.
    pub async fn list(&self, query: &PageQuery) -> AppResult<Page<TagCategory>> {
        let window = query.window()?;
        let sort = SortField::parse(
            query.sort.as_deref(),
            CATEGORY_SORT_COLUMNS,
            CATEGORY_DEFAULT_SORT,
        )?;
        let (rows, total) = self.repo.list(&query.keyword_pattern(), sort, window).await?;
        Ok(Page::new(rows, window, total))
    }

    /// Gets a live category.
    pub async fn get(&self, id: Uuid) -> AppResult<TagCategory> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag category not found"))
    }

    /// Creates a category. A slug is required.
    pub async fn create(&self, ctx: &RequestContext, input: CategoryInput) -> AppResult<TagCategory> {
        let raw = input
            .slug
            .ok_or_else(|| AppError::validation("Slug is required"))?;
        let data = CreateTagCategory {
            slug: normalize_slug(&raw)?,
            name: display_name(input.name.as_deref(), &raw),
            created_by: ctx.user_id,
        };

        let category = self.repo.create(&data).await?;
        info!(category_id = %category.id, slug = %category.slug, user_id = %ctx.user_id, "Tag category created");
        Ok(category)
    }

    /// Updates a category. Absent fields keep their value.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: CategoryInput,
    ) -> AppResult<TagCategory> {
        let data = UpdateTagCategory {
            id,
            slug: input.slug.as_deref().map(normalize_slug).transpose()?,
            name: input.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            updated_by: ctx.user_id,
        };

        let category = self.repo.update(&data).await?;
        info!(category_id = %id, user_id = %ctx.user_id, "Tag category updated");
        Ok(category)
    }

    /// Soft deletes a category.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<TagCategory> {
        let category = self.repo.soft_delete(id, ctx.user_id).await?;
        info!(category_id = %id, user_id = %ctx.user_id, "Tag category deleted");
        Ok(category)
    }
}
