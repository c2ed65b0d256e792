//! File and version handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use dam_core::types::FileId;
use dam_entity::file::{File, FileVersion, FileWithVersions};

use crate::dto::request::{MoveFilesBody, UpdateMetadataBody, UploadVersionBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<FileId>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.get_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}
pub async fn update_metadata(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<FileId>,
    ValidatedJson(req): ValidatedJson<UpdateMetadataBody>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state
        .file_service
        .update_metadata(&auth, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files/{id}/versions
pub async fn upload_version(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<FileId>,
    ValidatedJson(req): ValidatedJson<UploadVersionBody>,
) -> Result<(StatusCode, Json<ApiResponse<FileVersion>>), ApiError> {
    let version = state
        .version_service
        .upload_new_version(&auth, id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(version))))
}

/// GET /api/files/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<FileId>,
) -> Result<Json<ApiResponse<FileWithVersions>>, ApiError> {
    let file = state.version_service.list_versions(&auth, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files/move
pub async fn move_files(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<MoveFilesBody>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let moved = state.file_service.move_files(&auth, req.into()).await?;
    Ok(Json(ApiResponse::ok(moved)))
}
