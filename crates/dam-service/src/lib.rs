//! # dam-service
//!
//! Business logic for DAM Hub. Each service validates input, enforces
//! ownership, and delegates persistence to the repository traits from
//! `dam-database`.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time as `Arc<dyn …>` repositories.

pub mod context;
pub mod directory;
pub mod file;
pub mod settings;
mod validation;

pub use context::RequestContext;
pub use directory::{DirectoryService, ListingService};
pub use file::{FileService, VersionService};
pub use settings::UserSettingService;
