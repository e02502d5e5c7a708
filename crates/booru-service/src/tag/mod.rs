//! Tag taxonomy use cases.

pub mod category;
pub mod service;

pub use category::{CategoryInput, TagCategoryService};
pub use service::{TagInput, TagService};

use booru_core::error::AppError;
use booru_core::result::AppResult;
use booru_entity::tag::{is_valid_slug, sluggify};

/// Normalises a submitted slug, rejecting input with no usable characters.
pub(crate) fn normalize_slug(raw: &str) -> AppResult<String> {
    let slug = sluggify(raw.trim());
    if !is_valid_slug(&slug) {
        return Err(AppError::validation(
            "Slug must contain at least one of a-z, 0-9, '_', '(' or ')'",
        ));
    }
    Ok(slug)
}

/// Display name for a new entry: the given name, else the raw slug input.
pub(crate) fn display_name(name: Option<&str>, raw_slug: &str) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| raw_slug.trim())
        .to_string()
}
