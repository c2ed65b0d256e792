//! File upload, metadata, and re-parenting.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::{DirectoryId, FileId};
use dam_database::{DirectoryRepository, FileRepository};
use dam_entity::directory::Directory;
use dam_entity::file::{CreateFile, File};
use dam_entity::path;

use crate::context::RequestContext;
use crate::validation::{check_size, clean_name};

/// Manages file records.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<dyn FileRepository>,
    directories: Arc<dyn DirectoryRepository>,
}

/// Request to upload a brand-new file into a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFileRequest {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Content type, e.g. `image/png`.
    pub content_type: String,
}

/// Wholesale replacement of a file's descriptive metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMetadataRequest {
    /// New description (None clears it).
    pub description: Option<String>,
    /// New ordered tag list.
    pub tags: Vec<String>,
}

/// Request to move files into a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFilesRequest {
    /// Files to move, processed in order.
    pub source_file_ids: Vec<FileId>,
    /// New parent directory.
    pub destination_directory_id: DirectoryId,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileRepository>, directories: Arc<dyn DirectoryRepository>) -> Self {
        Self { files, directories }
    }

    /// Gets a file by ID.
    pub async fn get_file(&self, _ctx: &RequestContext, file_id: FileId) -> AppResult<File> {
        self.files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    /// Creates a file in `directory_id` together with its first version.
    pub async fn upload_new_file(
        &self,
        ctx: &RequestContext,
        directory_id: DirectoryId,
        req: UploadFileRequest,
    ) -> AppResult<File> {
        let name = clean_name(&req.name, "File")?;
        check_size(req.size_bytes)?;

        let directory = self.owned_directory(ctx, directory_id).await?;
        let (file, version) = self
            .files
            .create_with_first_version(&CreateFile {
                full_path: path::file_path(&directory, &name),
                name,
                size_bytes: req.size_bytes,
                content_type: req.content_type,
                user_id: ctx.user_id,
                directory_id: directory.id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            directory_id = %directory.id,
            version_id = %version.id,
            size = file.size_bytes,
            "File uploaded"
        );
        Ok(file)
    }

    /// Overwrites description and tags.
    pub async fn update_metadata(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        req: UpdateMetadataRequest,
    ) -> AppResult<File> {
        let file = self.get_file(ctx, file_id).await?;
        ctx.require_owner(file.user_id, "file")?;

        let updated = self
            .files
            .update_metadata(file_id, req.description.as_deref(), &req.tags)
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            tags = updated.tags.len(),
            "File metadata updated"
        );
        Ok(updated)
    }

    /// Re-parents files under the destination directory, keeping names.
    pub async fn move_files(
        &self,
        ctx: &RequestContext,
        req: MoveFilesRequest,
    ) -> AppResult<Vec<File>> {
        if req.source_file_ids.is_empty() {
            return Err(AppError::invalid_argument("No source files given"));
        }

        let destination = self
            .owned_directory(ctx, req.destination_directory_id)
            .await?;
        for file_id in &req.source_file_ids {
            let file = self.get_file(ctx, *file_id).await?;
            ctx.require_owner(file.user_id, "file")?;
        }

        let moved = self
            .files
            .move_files(&req.source_file_ids, destination.id)
            .await?;

        info!(
            user_id = %ctx.user_id,
            destination_id = %destination.id,
            count = moved.len(),
            "Files moved"
        );
        Ok(moved)
    }

    async fn owned_directory(
        &self,
        ctx: &RequestContext,
        directory_id: DirectoryId,
    ) -> AppResult<Directory> {
        let directory = self
            .directories
            .find_by_id(directory_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Directory {directory_id} not found")))?;
        ctx.require_owner(directory.user_id, "directory")?;
        Ok(directory)
    }
}
