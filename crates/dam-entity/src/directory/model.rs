//! Directory entity model.

use chrono::{DateTime, Utc};
use dam_core::types::{DirectoryId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A directory in a user's tree.
///
/// `full_path` is the chain of ancestor ids ending in the parent's id. It
/// does not contain the directory's own id; see [`crate::path`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Directory {
    /// Unique directory identifier.
    pub id: DirectoryId,
    /// Display name.
    pub name: String,
    /// Owning user.
    pub user_id: UserId,
    /// Materialized ancestor chain, e.g. `/<root id>/<parent id>`.
    pub full_path: String,
    /// Parent directory (None for a root).
    pub parent_directory_id: Option<DirectoryId>,
    /// Depth in the tree (0 for a root).
    pub level: i32,
    /// When the directory was created.
    pub created_at: DateTime<Utc>,
    /// When the directory was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Directory {
    /// Check if this is a root directory (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_directory_id.is_none()
    }

    /// Check whether `user_id` owns this directory.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Data required to insert a directory row.
#[derive(Debug, Clone)]
pub struct CreateDirectory {
    /// Display name.
    pub name: String,
    /// Owning user.
    pub user_id: UserId,
    /// Materialized path, already computed.
    pub full_path: String,
    /// Parent (None for a root).
    pub parent_directory_id: Option<DirectoryId>,
    /// Depth in the tree.
    pub level: i32,
}
