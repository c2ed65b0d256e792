//! Unified, paginated listing of a directory's immediate children.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use dam_core::config::ListingConfig;
use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::{ChildOrder, DirectoryId, PageRequest, PageResponse};
use dam_database::DirectoryRepository;
use dam_entity::directory::FileOrFolder;

use crate::context::RequestContext;

/// Raw listing parameters as sent by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListChildrenRequest {
    /// `<field>[ <asc|desc>]` over `created_at`, `updated_at`, `name`.
    pub order_by: Option<String>,
    /// Page size.
    pub limit: Option<i64>,
    /// Items to skip.
    pub offset: Option<i64>,
}

/// Produces ordered pages mixing sub-directories and files.
#[derive(Debug, Clone)]
pub struct ListingService {
    directories: Arc<dyn DirectoryRepository>,
    config: ListingConfig,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(directories: Arc<dyn DirectoryRepository>, config: ListingConfig) -> Self {
        Self {
            directories,
            config,
        }
    }

    /// Lists one page of the children of `directory_id`.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        directory_id: DirectoryId,
        req: ListChildrenRequest,
    ) -> AppResult<PageResponse<FileOrFolder>> {
        let order = ChildOrder::parse_or_default(req.order_by.as_deref())?;
        let page = PageRequest::resolve(req.limit, req.offset, &self.config)?;

        if self.directories.find_by_id(directory_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Directory {directory_id} not found"
            )));
        }

        let children = self
            .directories
            .list_children(directory_id, order, page)
            .await?;

        debug!(
            user_id = %ctx.user_id,
            directory_id = %directory_id,
            order = %order,
            returned = children.items.len(),
            total = children.total_items,
            "Listed children"
        );
        Ok(children)
    }
}
