//! Offset-based paging for child listings.

use serde::{Deserialize, Serialize};

use crate::config::ListingConfig;
use crate::error::AppError;
use crate::result::AppResult;

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items returned.
    pub limit: u64,
    /// Number of items skipped.
    pub offset: u64,
}

impl PageRequest {
    /// Build a page window from raw caller input.
    ///
    /// Missing values take `config.default_limit` and offset `0`. A negative
    /// offset or a limit outside `1..=config.max_limit` is rejected.
    pub fn resolve(
        limit: Option<i64>,
        offset: Option<i64>,
        config: &ListingConfig,
    ) -> AppResult<Self> {
        let limit = match limit {
            None => config.default_limit,
            Some(l) if l >= 1 && (l as u64) <= config.max_limit => l as u64,
            Some(l) => {
                return Err(AppError::invalid_argument(format!(
                    "limit must be between 1 and {}, got {l}",
                    config.max_limit
                )));
            }
        };
        let offset = match offset {
            None => 0,
            Some(o) if o >= 0 => o as u64,
            Some(o) => {
                return Err(AppError::invalid_argument(format!(
                    "offset must not be negative, got {o}"
                )));
            }
        };
        Ok(Self { limit, offset })
    }
}

/// One page of results plus the total count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Limit the page was requested with.
    pub limit: u64,
    /// Offset the page was requested with.
    pub offset: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Whether items exist past this page.
    pub has_more: bool,
}

impl<T> PageResponse<T> {
    /// Wrap a page of items.
    pub fn new(items: Vec<T>, page: PageRequest, total_items: u64) -> Self {
        let has_more = page.offset + (items.len() as u64) < total_items;
        Self {
            items,
            limit: page.limit,
            offset: page.offset,
            total_items,
            has_more,
        }
    }
}
