//! Backend-agnostic bundle of repository handles.

use std::sync::Arc;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{
    PgDirectoryRepository, PgFileRepository, PgFileVersionRepository, PgUserSettingRepository,
};
use crate::traits::{
    DirectoryRepository, FileRepository, FileVersionRepository, UserSettingRepository,
};

/// One handle per repository trait, all backed by the same store.
#[derive(Debug, Clone)]
pub struct RepositorySet {
    pub directories: Arc<dyn DirectoryRepository>,
    pub files: Arc<dyn FileRepository>,
    pub versions: Arc<dyn FileVersionRepository>,
    pub settings: Arc<dyn UserSettingRepository>,
}

impl RepositorySet {
    /// Repositories over a PostgreSQL pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            directories: Arc::new(PgDirectoryRepository::new(pool.clone())),
            files: Arc::new(PgFileRepository::new(pool.clone())),
            versions: Arc::new(PgFileVersionRepository::new(pool.clone())),
            settings: Arc::new(PgUserSettingRepository::new(pool)),
        }
    }

    /// Repositories sharing one [`MemoryStore`].
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            directories: store.clone(),
            files: store.clone(),
            versions: store.clone(),
            settings: store,
        }
    }
}
