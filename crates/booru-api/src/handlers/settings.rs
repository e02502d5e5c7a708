//! Public settings.

use axum::Json;
use axum::extract::State;

use booru_entity::settings::SettingsSnapshot;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get_settings(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<SettingsSnapshot>>> {
    let snapshot = state.settings_service.snapshot().await?;
    Ok(Json(ApiResponse::ok(snapshot)))
}
