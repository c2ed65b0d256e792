//! Appending and listing file versions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::FileId;
use dam_database::{FileRepository, FileVersionRepository};
use dam_entity::file::{CreateFileVersion, FileVersion, FileWithVersions};

use crate::context::RequestContext;
use crate::validation::check_size;

/// Manages the per-file version ledger.
#[derive(Debug, Clone)]
pub struct VersionService {
    files: Arc<dyn FileRepository>,
    versions: Arc<dyn FileVersionRepository>,
}

/// Request to upload new content for an existing file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadVersionRequest {
    /// Size in bytes.
    pub size_bytes: i64,
    /// Content type.
    pub content_type: String,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(files: Arc<dyn FileRepository>, versions: Arc<dyn FileVersionRepository>) -> Self {
        Self { files, versions }
    }

    /// Appends a version and makes it the file's latest.
    pub async fn upload_new_version(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        req: UploadVersionRequest,
    ) -> AppResult<FileVersion> {
        check_size(req.size_bytes)?;

        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;
        ctx.require_owner(file.user_id, "file")?;

        let (_, version) = self
            .versions
            .append(&CreateFileVersion {
                file_id,
                user_id: ctx.user_id,
                size_bytes: req.size_bytes,
                content_type: req.content_type,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            version_id = %version.id,
            version_number = version.version_number,
            "File version uploaded"
        );
        Ok(version)
    }

    /// Returns the file and all its versions, oldest first.
    pub async fn list_versions(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
    ) -> AppResult<FileWithVersions> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;
        let versions = self.versions.list_for_file(file_id).await?;

        debug!(user_id = %ctx.user_id, file_id = %file_id, count = versions.len(), "Listed versions");
        Ok(FileWithVersions { file, versions })
    }
}
