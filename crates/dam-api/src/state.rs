//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use dam_core::config::AppConfig;
use dam_database::{DatabasePool, RepositorySet};
use dam_service::{
    DirectoryService, FileService, ListingService, UserSettingService, VersionService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent when running on the memory store
    pub db_pool: Option<DatabasePool>,

    /// Directory tree service
    pub directory_service: Arc<DirectoryService>,
    /// Child listing service
    pub listing_service: Arc<ListingService>,
    /// File service
    pub file_service: Arc<FileService>,
    /// File version service
    pub version_service: Arc<VersionService>,
    /// User storage settings service
    pub setting_service: Arc<UserSettingService>,
}

impl AppState {
    /// Wires every service over one set of repositories.
    pub fn new(config: AppConfig, repos: RepositorySet, db_pool: Option<DatabasePool>) -> Self {
        let directory_service = Arc::new(DirectoryService::new(
            Arc::clone(&repos.directories),
            config.tree.clone(),
        ));
        let listing_service = Arc::new(ListingService::new(
            Arc::clone(&repos.directories),
            config.listing.clone(),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&repos.files),
            Arc::clone(&repos.directories),
        ));
        let version_service = Arc::new(VersionService::new(
            Arc::clone(&repos.files),
            Arc::clone(&repos.versions),
        ));
        let setting_service = Arc::new(UserSettingService::new(Arc::clone(&repos.settings)));

        Self {
            config: Arc::new(config),
            db_pool,
            directory_service,
            listing_service,
            file_service,
            version_service,
            setting_service,
        }
    }
}
