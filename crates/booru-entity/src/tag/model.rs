//! Tag and tag category rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Groups tags, e.g. `artist`, `character`, `general`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TagCategory {
    /// Row identifier.
    pub id: Uuid,
    /// Unique normalised identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creating user.
    pub created_by: Option<Uuid>,
    /// Last editing user.
    pub updated_by: Option<Uuid>,
    /// Deleting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<Uuid>,
}

/// A tag. `(slug, category_id)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Row identifier.
    pub id: Uuid,
    /// Normalised identifier, unique within its category.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Owning category.
    pub category_id: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creating user.
    pub created_by: Option<Uuid>,
    /// Last editing user.
    pub updated_by: Option<Uuid>,
    /// Deleting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<Uuid>,
}

/// A tag joined with its category's slug and name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TagDetail {
    /// The tag row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub tag: Tag,
    /// Slug of the owning category.
    pub category_slug: String,
    /// Name of the owning category.
    pub category_name: String,
}

/// Data for a new category.
#[derive(Debug, Clone)]
pub struct CreateTagCategory {
    /// Normalised slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Acting user.
    pub created_by: Uuid,
}

/// Changes to a category. `None` keeps the current value.
#[derive(Debug, Clone)]
pub struct UpdateTagCategory {
    /// Category to change.
    pub id: Uuid,
    /// New normalised slug.
    pub slug: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// Acting user.
    pub updated_by: Uuid,
}

/// Data for a new tag.
#[derive(Debug, Clone)]
pub struct CreateTag {
    /// Normalised slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Owning category.
    pub category_id: Uuid,
    /// Acting user.
    pub created_by: Uuid,
}

/// Changes to a tag. `None` keeps the current value.
#[derive(Debug, Clone)]
pub struct UpdateTag {
    /// Tag to change.
    pub id: Uuid,
    /// New normalised slug.
    pub slug: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New owning category.
    pub category_id: Option<Uuid>,
    /// Acting user.
    pub updated_by: Uuid,
}
