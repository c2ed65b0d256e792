//! User storage settings handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CreateUserSettingBody;
use crate::dto::response::{ApiResponse, UserSettingResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/users/settings
pub async fn create_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateUserSettingBody>,
) -> Result<(StatusCode, Json<ApiResponse<UserSettingResponse>>), ApiError> {
    let setting = state.setting_service.create_setting(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(setting.into()))))
}

/// GET /api/users/settings
pub async fn get_setting(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserSettingResponse>>, ApiError> {
    let setting = state.setting_service.get_setting(&auth).await?;
    Ok(Json(ApiResponse::ok(setting.into())))
}
