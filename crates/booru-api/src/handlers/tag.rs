//! Tag taxonomy handlers. Reads are public; writes sit behind the admin
//! guard.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use booru_core::types::{Page, PageQuery};
use booru_entity::tag::{TagCategory, TagDetail};

use crate::dto::request::{
    CreateCategoryRequest, CreateTagRequest, TagFilter, UpdateCategoryRequest, UpdateTagRequest,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PathParam, QueryParams, ValidatedJson};
use crate::state::AppState;

// ── Categories ───────────────────────────────────────────────────

/// GET /api/v1/tag-categories
pub async fn list_categories(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Json<ApiResponse<Page<TagCategory>>>> {
    let page = state.tag_category_service.list(&query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/v1/tag-categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<ApiResponse<TagCategory>>> {
    let category = state.tag_category_service.get(id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/v1/tag-categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<Json<ApiResponse<TagCategory>>> {
    let category = state
        .tag_category_service
        .create(&auth, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// PUT /api/v1/tag-categories
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateCategoryRequest>,
) -> ApiResult<Json<ApiResponse<TagCategory>>> {
    let (id, input) = req.into_parts();
    let category = state.tag_category_service.update(&auth, id, input).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/v1/tag-categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<ApiResponse<TagCategory>>> {
    let category = state.tag_category_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

// ── Tags ─────────────────────────────────────────────────────────

/// GET /api/v1/tags
pub async fn list_tags(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
    QueryParams(filter): QueryParams<TagFilter>,
) -> ApiResult<Json<ApiResponse<Page<TagDetail>>>> {
    let page = state.tag_service.list(&query, filter.category_id).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/v1/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<ApiResponse<TagDetail>>> {
    let tag = state.tag_service.get(id).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// GET /api/v1/tags/name/{slug}
pub async fn get_tags_by_slug(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> ApiResult<Json<ApiResponse<Vec<TagDetail>>>> {
    let tags = state.tag_service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::ok(tags)))
}

/// POST /api/v1/tags
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateTagRequest>,
) -> ApiResult<Json<ApiResponse<TagDetail>>> {
    let tag = state.tag_service.create(&auth, req.into()).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// PUT /api/v1/tags
pub async fn update_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateTagRequest>,
) -> ApiResult<Json<ApiResponse<TagDetail>>> {
    let (id, input) = req.into_parts();
    let tag = state.tag_service.update(&auth, id, input).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// DELETE /api/v1/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.tag_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::with_message((), "Tag deleted")))
}
