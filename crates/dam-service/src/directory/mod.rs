//! Directory tree management and child listings.

pub mod listing;
pub mod service;

pub use listing::{ListChildrenRequest, ListingService};
pub use service::{
    CreateDirectoryRequest, DirectoryService, MoveDirectoriesRequest,
};
