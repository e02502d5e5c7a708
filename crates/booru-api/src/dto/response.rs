//! Response DTOs.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use booru_entity::user::{Admin, UserDetail};

/// The `{status, data, message}` envelope every JSON response uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// Payload, `null` on errors.
    pub data: T,
    /// Free-form message. Carries the bearer token on sign-up and admin
    /// creation.
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// A `200` response.
    pub fn ok(data: T) -> Self {
        Self::with_message(data, "")
    }

    /// A `200` response with a message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data,
            message: message.into(),
        }
    }
}

impl ApiResponse<()> {
    /// An error response with `null` data.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            data: (),
            message: message.into(),
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Login name.
    pub name: String,
    /// Email, omitted from public listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// Whether the user holds the admin role.
    pub admin: bool,
    /// Capability mask.
    pub permission: i32,
}

impl UserResponse {
    /// Builds the view, keeping the email only when asked to.
    pub fn from_detail(detail: UserDetail, include_email: bool) -> Self {
        let permission = detail.permission_level().raw();
        Self {
            id: detail.user.id,
            name: detail.user.name,
            email: if include_email { detail.user.email } else { None },
            created_at: detail.user.created_at,
            updated_at: detail.user.updated_at,
            admin: detail.is_admin,
            permission,
        }
    }
}

/// Admin membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminResponse {
    /// Admin row ID.
    pub admin_id: Uuid,
    /// The administrator.
    pub user_id: Uuid,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            admin_id: admin.id,
            user_id: admin.user_id,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use booru_entity::permission::PermissionLevel;
    use booru_entity::user::User;

    use super::*;

    fn detail() -> UserDetail {
        UserDetail {
            user: User {
                id: Uuid::new_v4(),
                name: "luka".into(),
                email: Some("luka@example.com".into()),
                password_hash: "$argon2id$secret".into(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
                deleted_at: None,
            },
            is_admin: true,
            permission: Some(PermissionLevel::READ | PermissionLevel::WRITE),
        }
    }

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::with_message(1, "token")).unwrap();
        assert_eq!(body, serde_json::json!({"status": 200, "data": 1, "message": "token"}));

        let body = serde_json::to_value(ApiResponse::error(StatusCode::NOT_FOUND, "gone")).unwrap();
        assert_eq!(body, serde_json::json!({"status": 404, "data": null, "message": "gone"}));
    }

    #[test]
    fn test_user_response_hides_email_when_asked() {
        let public = serde_json::to_value(UserResponse::from_detail(detail(), false)).unwrap();
        assert!(public.get("email").is_none());
        assert!(public.get("password_hash").is_none());
        assert_eq!(public["permission"], 3);
        assert_eq!(public["admin"], true);

        let own = serde_json::to_value(UserResponse::from_detail(detail(), true)).unwrap();
        assert_eq!(own["email"], "luka@example.com");
    }
}
