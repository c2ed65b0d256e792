//! File storage and the version ledger.

pub mod service;
pub mod version;

pub use service::{FileService, MoveFilesRequest, UpdateMetadataRequest, UploadFileRequest};
pub use version::{UploadVersionRequest, VersionService};
