//! Directory tree handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use dam_core::types::{DirectoryId, PageResponse};
use dam_entity::directory::{Directory, FileOrFolder};
use dam_entity::file::File;

use crate::dto::request::{
    CreateDirectoryBody, CreateRootDirectoryBody, MoveDirectoriesBody, RenameDirectoryBody,
    UploadFileBody,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, ListChildrenQuery, ListQuery, ValidatedJson};
use crate::state::AppState;

/// GET /api/directories/roots
pub async fn list_roots(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Directory>>>, ApiError> {
    let roots = state.directory_service.list_roots(&auth).await?;
    Ok(Json(ApiResponse::ok(roots)))
}

/// POST /api/directories/roots
pub async fn create_root(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateRootDirectoryBody>,
) -> Result<(StatusCode, Json<ApiResponse<Directory>>), ApiError> {
    let root = state.directory_service.create_root(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(root))))
}

/// POST /api/directories
pub async fn create_directory(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateDirectoryBody>,
) -> Result<(StatusCode, Json<ApiResponse<Directory>>), ApiError> {
    let directory = state
        .directory_service
        .create_directory(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(directory))))
}

/// GET /api/directories/{id}
pub async fn get_directory(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<DirectoryId>,
) -> Result<Json<ApiResponse<Directory>>, ApiError> {
    let directory = state.directory_service.get_directory(&auth, id).await?;
    Ok(Json(ApiResponse::ok(directory)))
}

/// PUT /api/directories/{id}
pub async fn rename_directory(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<DirectoryId>,
    ValidatedJson(req): ValidatedJson<RenameDirectoryBody>,
) -> Result<Json<ApiResponse<Directory>>, ApiError> {
    let directory = state
        .directory_service
        .rename_directory(&auth, id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(directory)))
}

/// GET /api/directories/{id}/children?order_by=&limit=&offset=
pub async fn list_children(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<DirectoryId>,
    ListQuery(query): ListQuery<ListChildrenQuery>,
) -> Result<Json<ApiResponse<PageResponse<FileOrFolder>>>, ApiError> {
    let page = state
        .listing_service
        .list_children(&auth, id, query.into())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/directories/move
pub async fn move_directories(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<MoveDirectoriesBody>,
) -> Result<Json<ApiResponse<Vec<Directory>>>, ApiError> {
    let moved = state
        .directory_service
        .move_directories(&auth, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(moved)))
}

/// POST /api/directories/{id}/files
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<DirectoryId>,
    ValidatedJson(req): ValidatedJson<UploadFileBody>,
) -> Result<(StatusCode, Json<ApiResponse<File>>), ApiError> {
    let file = state
        .file_service
        .upload_new_file(&auth, id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}
