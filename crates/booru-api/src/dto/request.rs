//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use booru_entity::user::UpdateUser;
use booru_service::tag::{CategoryInput, TagInput};
use booru_service::user::NewAccount;

/// Sign-up and admin creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Login name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Optional email. Blank counts as absent.
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<SignUpRequest> for NewAccount {
    fn from(req: SignUpRequest) -> Self {
        NewAccount::new(req.name, req.email, req.password)
    }
}

/// Reads an optional string, treating an empty or whitespace-only value as
/// missing.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Sign-in body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Login name or email.
    #[validate(length(min = 1, message = "Name or email is required"))]
    pub name_or_email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    /// New password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Profile update body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New login name.
    pub name: Option<String>,
    /// New email. Blank counts as absent.
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        UpdateUser {
            name: req.name,
            email: req.email,
        }
    }
}

/// Permission assignment body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPermissionRequest {
    /// Target user.
    pub user_id: Uuid,
    /// New mask, a combination of 1, 2, 4 and 8.
    #[validate(range(min = 0, max = 15, message = "Permission level must be between 0 and 15"))]
    pub permission_level: i32,
}

/// Category creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Slug, normalised by the server.
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,
    /// Display name, defaults to the submitted slug.
    pub name: Option<String>,
}

impl From<CreateCategoryRequest> for CategoryInput {
    fn from(req: CreateCategoryRequest) -> Self {
        CategoryInput {
            slug: Some(req.slug),
            name: req.name,
        }
    }
}

/// Category update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    /// Category to change.
    pub id: Uuid,
    /// New slug.
    pub slug: Option<String>,
    /// New display name.
    pub name: Option<String>,
}

impl UpdateCategoryRequest {
    /// Splits into target id and changes.
    pub fn into_parts(self) -> (Uuid, CategoryInput) {
        (
            self.id,
            CategoryInput {
                slug: self.slug,
                name: self.name,
            },
        )
    }
}

/// Tag creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Slug, normalised by the server.
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,
    /// Display name, defaults to the submitted slug.
    pub name: Option<String>,
    /// Owning category.
    pub category_id: Uuid,
}

impl From<CreateTagRequest> for TagInput {
    fn from(req: CreateTagRequest) -> Self {
        TagInput {
            slug: Some(req.slug),
            name: req.name,
            category_id: Some(req.category_id),
        }
    }
}

/// Tag update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTagRequest {
    /// Tag to change.
    pub id: Uuid,
    /// New slug.
    pub slug: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New owning category.
    pub category_id: Option<Uuid>,
}

impl UpdateTagRequest {
    /// Splits into target id and changes.
    pub fn into_parts(self) -> (Uuid, TagInput) {
        (
            self.id,
            TagInput {
                slug: self.slug,
                name: self.name,
                category_id: self.category_id,
            },
        )
    }
}

/// Listing filter for users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Only users holding the admin role.
    #[serde(default)]
    pub is_admin: bool,
}

/// Listing filter for tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagFilter {
    /// Only tags in this category.
    pub category_id: Option<Uuid>,
}
