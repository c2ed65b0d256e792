//! File entity model.

use chrono::{DateTime, Utc};
use dam_core::types::{DirectoryId, FileId, FileVersionId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::version::FileVersion;

/// A logical file stored in a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// File name (last segment of `full_path`).
    pub name: String,
    /// Size of the latest version in bytes.
    pub size_bytes: i64,
    /// Content type of the latest version.
    pub content_type: String,
    /// Owning user.
    pub user_id: UserId,
    /// Current parent directory.
    pub directory_id: DirectoryId,
    /// Parent directory's `full_path` followed by `/` and the name.
    pub full_path: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Ordered tags. Duplicates are kept as given.
    pub tags: Vec<String>,
    /// Most recently created version.
    pub latest_version_id: Option<FileVersionId>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Check whether `user_id` owns this file.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Data required to insert a file together with its first version.
#[derive(Debug, Clone)]
pub struct CreateFile {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Content type.
    pub content_type: String,
    /// Owning user.
    pub user_id: UserId,
    /// Parent directory.
    pub directory_id: DirectoryId,
    /// Materialized path, already computed.
    pub full_path: String,
}

/// A file and its full version history, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileWithVersions {
    /// The file record.
    pub file: File,
    /// Every version, ordered by creation time then version number.
    pub versions: Vec<FileVersion>,
}
