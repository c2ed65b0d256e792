//! File repository implementation.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use dam_core::error::{AppError, ErrorKind};
use dam_core::result::AppResult;
use dam_core::types::{DirectoryId, FileId, FileVersionId};
use dam_entity::file::{CreateFile, File, FileVersion};
use dam_entity::path;

use super::directory::lock_directory;
use super::{begin_failed, commit_failed};
use crate::traits::FileRepository;

/// File rows in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Read a file inside a transaction, locking its row.
pub(crate) async fn lock_file(conn: &mut PgConnection, id: FileId) -> AppResult<File> {
    sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to lock file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to find file", e))
    }

    async fn create_with_first_version(&self, data: &CreateFile) -> AppResult<(File, FileVersion)> {
        let mut tx = self.pool.begin().await.map_err(begin_failed)?;
        let file_id = FileId::new();

        sqlx::query(
            "INSERT INTO files (id, name, size_bytes, content_type, user_id, directory_id, full_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(file_id)
        .bind(&data.name)
        .bind(data.size_bytes)
        .bind(&data.content_type)
        .bind(data.user_id)
        .bind(data.directory_id)
        .bind(&data.full_path)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to create file", e))?;

        let version = sqlx::query_as::<_, FileVersion>(
            "INSERT INTO file_versions (id, file_id, version_number, size_bytes, content_type, user_id) \
             VALUES ($1, $2, 1, $3, $4, $5) RETURNING *",
        )
        .bind(FileVersionId::new())
        .bind(file_id)
        .bind(data.size_bytes)
        .bind(&data.content_type)
        .bind(data.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to create file version", e))?;

        let file = sqlx::query_as::<_, File>(
            "UPDATE files SET latest_version_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(file_id)
        .bind(version.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to link latest version", e))?;

        tx.commit().await.map_err(commit_failed)?;
        Ok((file, version))
    }

    async fn update_metadata(
        &self,
        id: FileId,
        description: Option<&str>,
        tags: &[String],
    ) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET description = $2, tags = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(description)
        .bind(tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to update file metadata", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn move_files(&self, ids: &[FileId], destination: DirectoryId) -> AppResult<Vec<File>> {
        let mut tx = self.pool.begin().await.map_err(begin_failed)?;
        let target = lock_directory(&mut *tx, destination).await?;

        let mut moved = Vec::with_capacity(ids.len());
        for id in ids {
            let file = lock_file(&mut *tx, *id).await?;
            let new_path = path::rebase_file_path(&file.full_path, &target.full_path);

            let file = sqlx::query_as::<_, File>(
                "UPDATE files SET directory_id = $2, full_path = $3, updated_at = NOW() \
                 WHERE id = $1 RETURNING *",
            )
            .bind(file.id)
            .bind(target.id)
            .bind(&new_path)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to move file", e))?;
            moved.push(file);
        }

        tx.commit().await.map_err(commit_failed)?;
        Ok(moved)
    }
}
