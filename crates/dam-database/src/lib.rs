//! # dam-database
//!
//! Persistence for DAM Hub: the per-entity repository traits, their
//! PostgreSQL implementations, and a process-local memory store that
//! implements the same traits for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod registry;
pub mod repositories;
pub mod traits;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use registry::RepositorySet;
pub use traits::{
    DirectoryRepository, FileRepository, FileVersionRepository, UserSettingRepository,
};
