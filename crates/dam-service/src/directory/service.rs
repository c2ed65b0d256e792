//! Directory creation, rename, and subtree moves.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use dam_core::config::TreeConfig;
use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::DirectoryId;
use dam_database::DirectoryRepository;
use dam_entity::directory::{CreateDirectory, Directory};
use dam_entity::path;

use crate::context::RequestContext;
use crate::validation::clean_name;

/// Manages the directory tree of each user.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    directories: Arc<dyn DirectoryRepository>,
    tree: TreeConfig,
}

/// Request to create a directory under an existing parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDirectoryRequest {
    /// Directory name.
    pub name: String,
    /// Parent directory.
    pub parent_directory_id: DirectoryId,
}

/// Request to move one or more directories under a destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveDirectoriesRequest {
    /// Directories to move, processed in order.
    pub source_directory_ids: Vec<DirectoryId>,
    /// New parent for every source.
    pub destination_directory_id: DirectoryId,
}

impl DirectoryService {
    /// Creates a new directory service.
    pub fn new(directories: Arc<dyn DirectoryRepository>, tree: TreeConfig) -> Self {
        Self { directories, tree }
    }

    /// Creates a new root directory for the caller.
    pub async fn create_root(&self, ctx: &RequestContext, name: &str) -> AppResult<Directory> {
        let name = clean_name(name, "Directory")?;

        let root = self
            .directories
            .create(&CreateDirectory {
                name,
                user_id: ctx.user_id,
                full_path: self.tree.root_path.clone(),
                parent_directory_id: None,
                level: 0,
            })
            .await?;

        info!(user_id = %ctx.user_id, directory_id = %root.id, "Root directory created");
        Ok(root)
    }

    /// Lists the caller's root directories, oldest first.
    pub async fn list_roots(&self, ctx: &RequestContext) -> AppResult<Vec<Directory>> {
        let roots = self.directories.list_roots(ctx.user_id).await?;
        debug!(user_id = %ctx.user_id, count = roots.len(), "Listed root directories");
        Ok(roots)
    }

    /// Gets a directory by ID.
    pub async fn get_directory(
        &self,
        _ctx: &RequestContext,
        directory_id: DirectoryId,
    ) -> AppResult<Directory> {
        self.directories
            .find_by_id(directory_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Directory {directory_id} not found")))
    }

    /// Creates a directory one level below `req.parent_directory_id`.
    pub async fn create_directory(
        &self,
        ctx: &RequestContext,
        req: CreateDirectoryRequest,
    ) -> AppResult<Directory> {
        let name = clean_name(&req.name, "Directory")?;
        let parent = self
            .directories
            .find_by_id(req.parent_directory_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Parent directory {} not found",
                    req.parent_directory_id
                ))
            })?;
        ctx.require_owner(parent.user_id, "parent directory")?;

        let directory = self
            .directories
            .create(&CreateDirectory {
                name,
                user_id: ctx.user_id,
                full_path: path::child_directory_path(&parent),
                parent_directory_id: Some(parent.id),
                level: parent.level + 1,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            directory_id = %directory.id,
            parent_id = %parent.id,
            "Directory created"
        );
        Ok(directory)
    }

    /// Renames a directory. Never touches any `full_path`.
    pub async fn rename_directory(
        &self,
        ctx: &RequestContext,
        directory_id: DirectoryId,
        new_name: &str,
    ) -> AppResult<Directory> {
        let name = clean_name(new_name, "Directory")?;
        let directory = self.get_directory(ctx, directory_id).await?;
        ctx.require_owner(directory.user_id, "directory")?;

        let renamed = self.directories.rename(directory_id, &name).await?;
        info!(user_id = %ctx.user_id, directory_id = %directory_id, "Directory renamed");
        Ok(renamed)
    }

    /// Moves every source subtree under the destination in one atomic step.
    pub async fn move_directories(
        &self,
        ctx: &RequestContext,
        req: MoveDirectoriesRequest,
    ) -> AppResult<Vec<Directory>> {
        if req.source_directory_ids.is_empty() {
            return Err(AppError::invalid_argument("No source directories given"));
        }

        let destination = self
            .directories
            .find_by_id(req.destination_directory_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Destination directory {} not found",
                    req.destination_directory_id
                ))
            })?;
        ctx.require_owner(destination.user_id, "destination directory")?;

        for source_id in &req.source_directory_ids {
            let source = self.get_directory(ctx, *source_id).await?;
            ctx.require_owner(source.user_id, "source directory")?;
            // Early rejection; the store re-plans each step against current rows.
            path::plan_subtree_move(&source, &destination)?;
            debug!(directory_id = %source_id, "Move source validated");
        }

        let moved = self
            .directories
            .move_subtrees(&req.source_directory_ids, destination.id)
            .await?;

        info!(
            user_id = %ctx.user_id,
            destination_id = %destination.id,
            count = moved.len(),
            "Directories moved"
        );
        Ok(moved)
    }
}
