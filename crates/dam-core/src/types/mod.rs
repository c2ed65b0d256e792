//! Shared domain types: typed identifiers, paging, and child ordering.

pub mod id;
pub mod pagination;
pub mod sorting;

pub use id::{DirectoryId, FileId, FileVersionId, UserId, UserSettingId};
pub use pagination::{PageRequest, PageResponse};
pub use sorting::{ChildOrder, ChildSortField, SortDirection};
