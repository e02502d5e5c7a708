//! Account handlers: sign-up, sign-in, bootstrap, self-service and the
//! public user directory.

use axum::Json;
use axum::extract::State;
use tracing::debug;
use uuid::Uuid;

use booru_core::types::{Page, PageQuery};

use crate::dto::request::{
    ChangePasswordRequest, SignInRequest, SignUpRequest, UpdateUserRequest, UserFilter,
};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PathParam, QueryParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/v1/user/sign-up
///
/// The bearer token is returned in `message`.
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    debug!(name = %req.name, "Sign-up requested");
    let (user, token) = state.user_service.sign_up(req.into()).await?;
    Ok(Json(ApiResponse::with_message(
        UserResponse::from_detail(user, true),
        token,
    )))
}

/// POST /api/v1/user/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> ApiResult<Json<ApiResponse<String>>> {
    let token = state
        .user_service
        .sign_in(&req.name_or_email, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(token)))
}

/// POST /api/v1/user/init-admin-create
pub async fn init_admin_create(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    debug!(name = %req.name, "Initial admin creation requested");
    let (user, token) = state.admin_service.bootstrap(req.into()).await?;
    Ok(Json(ApiResponse::with_message(
        UserResponse::from_detail(user, true),
        token,
    )))
}

/// PUT /api/v1/user/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .user_service
        .change_password(&auth, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::with_message((), "Password changed")))
}

/// GET /api/v1/user
pub async fn get_self(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_self(&auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from_detail(user, true))))
}

/// PUT /api/v1/user
pub async fn update_self(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    state.user_service.update_self(&auth, req.into()).await?;
    let user = state.user_service.get_self(&auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from_detail(user, true))))
}

/// DELETE /api/v1/user
pub async fn delete_self(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.user_service.delete_self(&auth).await?;
    Ok(Json(ApiResponse::with_message((), "User deleted")))
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
    QueryParams(filter): QueryParams<UserFilter>,
) -> ApiResult<Json<ApiResponse<Page<UserResponse>>>> {
    let page = state.user_service.list(&query, filter.is_admin).await?;
    Ok(Json(ApiResponse::ok(
        page.map(|u| UserResponse::from_detail(u, false)),
    )))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get(id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from_detail(user, true))))
}
