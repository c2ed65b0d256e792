//! File version repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use dam_core::error::{AppError, ErrorKind};
use dam_core::result::AppResult;
use dam_core::types::{FileId, FileVersionId};
use dam_entity::file::{CreateFileVersion, File, FileVersion};

use super::file::lock_file;
use super::{begin_failed, commit_failed};
use crate::traits::FileVersionRepository;

/// Append-only version rows in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgFileVersionRepository {
    pool: PgPool,
}

impl PgFileVersionRepository {
    /// Create a new file version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileVersionRepository for PgFileVersionRepository {
    async fn append(&self, data: &CreateFileVersion) -> AppResult<(File, FileVersion)> {
        let mut tx = self.pool.begin().await.map_err(begin_failed)?;

        // The row lock on the file serializes concurrent appends.
        let file = lock_file(&mut *tx, data.file_id).await?;

        let next: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(version_number), 0) + 1 FROM file_versions WHERE file_id = $1",
        )
        .bind(file.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to number version", e))?;

        let version = sqlx::query_as::<_, FileVersion>(
            "INSERT INTO file_versions (id, file_id, version_number, size_bytes, content_type, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(FileVersionId::new())
        .bind(file.id)
        .bind(next)
        .bind(data.size_bytes)
        .bind(&data.content_type)
        .bind(data.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to create file version", e))?;

        let file = sqlx::query_as::<_, File>(
            "UPDATE files SET latest_version_id = $2, size_bytes = $3, content_type = $4, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(file.id)
        .bind(version.id)
        .bind(version.size_bytes)
        .bind(&version.content_type)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to link latest version", e))?;

        tx.commit().await.map_err(commit_failed)?;
        Ok((file, version))
    }

    async fn list_for_file(&self, file_id: FileId) -> AppResult<Vec<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = $1 \
             ORDER BY created_at ASC, version_number ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to list file versions", e))
    }
}
