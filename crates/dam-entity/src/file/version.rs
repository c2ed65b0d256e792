//! File version entity.

use chrono::{DateTime, Utc};
use dam_core::types::{FileId, FileVersionId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One uploaded content version of a file. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileVersion {
    /// Unique version identifier; also the object key in storage.
    pub id: FileVersionId,
    /// The file this version belongs to.
    pub file_id: FileId,
    /// Sequential version number, starting at 1.
    pub version_number: i32,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Content type.
    pub content_type: String,
    /// User who uploaded this version.
    pub user_id: UserId,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at`; versions are never updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to append a version.
#[derive(Debug, Clone)]
pub struct CreateFileVersion {
    /// Target file.
    pub file_id: FileId,
    /// Uploading user.
    pub user_id: UserId,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Content type.
    pub content_type: String,
}
