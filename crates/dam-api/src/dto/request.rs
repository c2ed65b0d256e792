//! Request DTOs with validation.
//!
//! Structural rules live here; the services re-check names after trimming.

use serde::{Deserialize, Serialize};
use validator::Validate;

use dam_core::types::{DirectoryId, FileId};
use dam_service::directory::{CreateDirectoryRequest as SvcCreateDirectory, MoveDirectoriesRequest};
use dam_service::file::{MoveFilesRequest, UpdateMetadataRequest, UploadFileRequest, UploadVersionRequest};
use dam_service::settings::CreateUserSettingRequest;

/// Create a root directory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRootDirectoryBody {
    /// Directory name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Create a directory under an existing parent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDirectoryBody {
    /// Directory name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Parent directory.
    pub parent_directory_id: DirectoryId,
}

impl From<CreateDirectoryBody> for SvcCreateDirectory {
    fn from(body: CreateDirectoryBody) -> Self {
        Self {
            name: body.name,
            parent_directory_id: body.parent_directory_id,
        }
    }
}

/// Rename a directory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameDirectoryBody {
    /// New name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Move directory subtrees under a destination.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveDirectoriesBody {
    /// Directories to move, applied in order.
    #[validate(length(min = 1, message = "At least one source directory is required"))]
    pub source_directory_ids: Vec<DirectoryId>,
    /// New parent.
    pub destination_directory_id: DirectoryId,
}

impl From<MoveDirectoriesBody> for MoveDirectoriesRequest {
    fn from(body: MoveDirectoriesBody) -> Self {
        Self {
            source_directory_ids: body.source_directory_ids,
            destination_directory_id: body.destination_directory_id,
        }
    }
}

/// Register a new file in a directory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadFileBody {
    /// File name, kept verbatim in the path.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Content size in bytes.
    #[validate(range(min = 0, message = "Size must not be negative"))]
    pub size_bytes: i64,
    /// MIME type.
    #[validate(length(min = 1, max = 255))]
    pub content_type: String,
}

impl From<UploadFileBody> for UploadFileRequest {
    fn from(body: UploadFileBody) -> Self {
        Self {
            name: body.name,
            size_bytes: body.size_bytes,
            content_type: body.content_type,
        }
    }
}

/// Append a version to a file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadVersionBody {
    /// Content size in bytes.
    #[validate(range(min = 0, message = "Size must not be negative"))]
    pub size_bytes: i64,
    /// MIME type.
    #[validate(length(min = 1, max = 255))]
    pub content_type: String,
}

impl From<UploadVersionBody> for UploadVersionRequest {
    fn from(body: UploadVersionBody) -> Self {
        Self {
            size_bytes: body.size_bytes,
            content_type: body.content_type,
        }
    }
}

/// Replace a file's description and tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMetadataBody {
    /// New description; `null` clears it.
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    /// New tag set.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<UpdateMetadataBody> for UpdateMetadataRequest {
    fn from(body: UpdateMetadataBody) -> Self {
        Self {
            description: body.description,
            tags: body.tags,
        }
    }
}

/// Move files into a directory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveFilesBody {
    /// Files to move.
    #[validate(length(min = 1, message = "At least one source file is required"))]
    pub source_file_ids: Vec<FileId>,
    /// Target directory.
    pub destination_directory_id: DirectoryId,
}

impl From<MoveFilesBody> for MoveFilesRequest {
    fn from(body: MoveFilesBody) -> Self {
        Self {
            source_file_ids: body.source_file_ids,
            destination_directory_id: body.destination_directory_id,
        }
    }
}

/// Register the caller's object storage.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserSettingBody {
    /// Only `amazon_s3` is supported.
    #[validate(length(min = 1))]
    pub storage_vendor: String,
    #[validate(length(min = 1, max = 255))]
    pub bucket_name: String,
    #[validate(length(min = 1, max = 64))]
    pub region: String,
    #[validate(length(min = 1))]
    pub access_key_id: String,
    #[validate(length(min = 1))]
    pub secret_access_key: String,
}

impl From<CreateUserSettingBody> for CreateUserSettingRequest {
    fn from(body: CreateUserSettingBody) -> Self {
        Self {
            storage_vendor: body.storage_vendor,
            bucket_name: body.bucket_name,
            region: body.region,
            access_key_id: body.access_key_id,
            secret_access_key: body.secret_access_key,
        }
    }
}
