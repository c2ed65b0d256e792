//! Unified child listing projection.

use chrono::{DateTime, Utc};
use dam_core::types::DirectoryId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One entry of a directory listing: either a sub-directory or a file.
///
/// Never persisted. Produced by the children union scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileOrFolder {
    /// Directory or file identifier, depending on `is_directory`.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The directory being listed.
    pub parent_id: DirectoryId,
    /// `true` for sub-directories.
    pub is_directory: bool,
    /// Stored `full_path` of the entry.
    pub full_path: String,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}
