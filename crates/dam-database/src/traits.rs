//! Per-entity repository traits.
//!
//! Services depend on these as `Arc<dyn …>` so the PostgreSQL repositories
//! and the [`MemoryStore`](crate::MemoryStore) are interchangeable. Every
//! method that touches more than one row is atomic: either all of its
//! writes land or none do.

use std::fmt::Debug;

use async_trait::async_trait;

use dam_core::result::AppResult;
use dam_core::types::{
    ChildOrder, DirectoryId, FileId, PageRequest, PageResponse, UserId,
};
use dam_entity::directory::{CreateDirectory, Directory, FileOrFolder};
use dam_entity::file::{CreateFile, CreateFileVersion, File, FileVersion};
use dam_entity::settings::{CreateUserSetting, UserSetting};

/// Directory rows and the children union scan.
#[async_trait]
pub trait DirectoryRepository: Send + Sync + Debug + 'static {
    /// Find a directory by ID.
    async fn find_by_id(&self, id: DirectoryId) -> AppResult<Option<Directory>>;

    /// Root directories owned by `user_id`, oldest first.
    async fn list_roots(&self, user_id: UserId) -> AppResult<Vec<Directory>>;

    /// Insert a directory. A `None` parent makes it a root.
    async fn create(&self, data: &CreateDirectory) -> AppResult<Directory>;

    /// Change a directory's name. Paths are untouched.
    async fn rename(&self, id: DirectoryId, name: &str) -> AppResult<Directory>;

    /// Move each source subtree under `destination`, in order, atomically.
    ///
    /// Rewrites the path prefix and level of every directory in each moved
    /// subtree and the path prefix of every file they contain. Returns the
    /// moved source directories in input order.
    async fn move_subtrees(
        &self,
        sources: &[DirectoryId],
        destination: DirectoryId,
    ) -> AppResult<Vec<Directory>>;

    /// One page of the immediate children (directories and files) of `id`.
    async fn list_children(
        &self,
        id: DirectoryId,
        order: ChildOrder,
        page: PageRequest,
    ) -> AppResult<PageResponse<FileOrFolder>>;
}

/// File rows.
#[async_trait]
pub trait FileRepository: Send + Sync + Debug + 'static {
    /// Find a file by ID.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>>;

    /// Insert a file and its version 1, pointing `latest_version_id` at it.
    async fn create_with_first_version(&self, data: &CreateFile) -> AppResult<(File, FileVersion)>;

    /// Overwrite description and tags.
    async fn update_metadata(
        &self,
        id: FileId,
        description: Option<&str>,
        tags: &[String],
    ) -> AppResult<File>;

    /// Re-parent files under `destination`, atomically. Returns them in input order.
    async fn move_files(&self, ids: &[FileId], destination: DirectoryId) -> AppResult<Vec<File>>;
}

/// Append-only file version ledger.
#[async_trait]
pub trait FileVersionRepository: Send + Sync + Debug + 'static {
    /// Append the next version and update the file's latest pointer, size,
    /// and content type. Concurrent appends to one file serialize.
    async fn append(&self, data: &CreateFileVersion) -> AppResult<(File, FileVersion)>;

    /// All versions of a file, oldest first.
    async fn list_for_file(&self, file_id: FileId) -> AppResult<Vec<FileVersion>>;
}

/// Per-user storage settings.
#[async_trait]
pub trait UserSettingRepository: Send + Sync + Debug + 'static {
    /// Find the settings row of a user.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<UserSetting>>;

    /// Insert the settings row, failing with `Conflict` if the user has one.
    async fn create(&self, data: &CreateUserSetting) -> AppResult<UserSetting>;
}
