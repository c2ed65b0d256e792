//! PostgreSQL repository implementations.

pub mod directory;
pub mod file;
pub mod user_setting;
pub mod version;

pub use directory::PgDirectoryRepository;
pub use file::PgFileRepository;
pub use user_setting::PgUserSettingRepository;
pub use version::PgFileVersionRepository;

use dam_core::error::{AppError, ErrorKind};

/// Wrap a sqlx error, mapping unique violations to `Conflict`.
pub(crate) fn map_write_error(err: sqlx::Error, conflict: &str, context: &str) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::conflict(conflict)
        }
        _ => AppError::with_source(ErrorKind::Internal, context, err),
    }
}

pub(crate) fn begin_failed(err: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Internal, "Failed to begin transaction", err)
}

pub(crate) fn commit_failed(err: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Internal, "Failed to commit transaction", err)
}
