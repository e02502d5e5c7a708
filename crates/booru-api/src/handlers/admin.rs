//! Admin-only handlers. Every route here sits behind the admin guard.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use booru_core::types::{Page, PageQuery};
use booru_entity::permission::Permission;

use crate::dto::request::{SetPermissionRequest, SignUpRequest, UpdateUserRequest};
use crate::dto::response::{AdminResponse, ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PathParam, QueryParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/v1/admin/manage
pub async fn create_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let (user, token) = state
        .admin_service
        .create_admin(auth.user_id, req.into())
        .await?;
    Ok(Json(ApiResponse::with_message(
        UserResponse::from_detail(user, true),
        token,
    )))
}

/// GET /api/v1/admin/manage
pub async fn list_admins(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Json<ApiResponse<Page<UserResponse>>>> {
    let page = state.admin_service.list(&query).await?;
    Ok(Json(ApiResponse::ok(
        page.map(|u| UserResponse::from_detail(u, true)),
    )))
}

/// PUT /api/v1/admin/manage/{id}
pub async fn assign_admin(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
) -> ApiResult<Json<ApiResponse<AdminResponse>>> {
    let admin = state.admin_service.assign(user_id).await?;
    Ok(Json(ApiResponse::ok(admin.into())))
}

/// DELETE /api/v1/admin/manage/{id}
pub async fn remove_admin(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
) -> ApiResult<Json<ApiResponse<AdminResponse>>> {
    let admin = state.admin_service.remove(user_id).await?;
    Ok(Json(ApiResponse::ok(admin.into())))
}

/// PUT /api/v1/admin/user/{id}
pub async fn update_user(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    state.admin_service.update_user(user_id, req.into()).await?;
    let user = state.user_service.get(user_id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from_detail(user, true))))
}

/// GET /api/v1/admin/user/permission/{id}
pub async fn get_permission(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
) -> ApiResult<Json<ApiResponse<Permission>>> {
    let permission = state.permission_service.get(user_id).await?;
    Ok(Json(ApiResponse::ok(permission)))
}

/// PUT /api/v1/admin/user/permission
pub async fn set_permission(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SetPermissionRequest>,
) -> ApiResult<Json<ApiResponse<Permission>>> {
    let permission = state
        .permission_service
        .set(req.user_id, req.permission_level)
        .await?;
    Ok(Json(ApiResponse::ok(permission)))
}
