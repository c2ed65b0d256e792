//! Directory repository implementation.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::debug;
use uuid::Uuid;

use dam_core::error::{AppError, ErrorKind};
use dam_core::result::AppResult;
use dam_core::types::{ChildOrder, DirectoryId, PageRequest, PageResponse, UserId};
use dam_entity::directory::{CreateDirectory, Directory, FileOrFolder};
use dam_entity::path;

use super::{begin_failed, commit_failed};
use crate::traits::DirectoryRepository;

/// Directory rows and subtree rewrites in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgDirectoryRepository {
    pool: PgPool,
}

impl PgDirectoryRepository {
    /// Create a new directory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Read a directory inside a transaction, locking its row.
pub(crate) async fn lock_directory(conn: &mut PgConnection, id: DirectoryId) -> AppResult<Directory> {
    sqlx::query_as::<_, Directory>("SELECT * FROM directories WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to lock directory", e))?
        .ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))
}

#[async_trait]
impl DirectoryRepository for PgDirectoryRepository {
    async fn find_by_id(&self, id: DirectoryId) -> AppResult<Option<Directory>> {
        sqlx::query_as::<_, Directory>("SELECT * FROM directories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to find directory", e))
    }

    async fn list_roots(&self, user_id: UserId) -> AppResult<Vec<Directory>> {
        sqlx::query_as::<_, Directory>(
            "SELECT * FROM directories WHERE user_id = $1 AND parent_directory_id IS NULL \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to list root directories", e))
    }

    async fn create(&self, data: &CreateDirectory) -> AppResult<Directory> {
        sqlx::query_as::<_, Directory>(
            "INSERT INTO directories (id, name, user_id, full_path, parent_directory_id, level) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(DirectoryId::new())
        .bind(&data.name)
        .bind(data.user_id)
        .bind(&data.full_path)
        .bind(data.parent_directory_id)
        .bind(data.level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found("Parent directory not found")
            }
            _ => AppError::with_source(ErrorKind::Internal, "Failed to create directory", e),
        })
    }

    async fn rename(&self, id: DirectoryId, name: &str) -> AppResult<Directory> {
        sqlx::query_as::<_, Directory>(
            "UPDATE directories SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to rename directory", e))?
        .ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))
    }

    async fn move_subtrees(
        &self,
        sources: &[DirectoryId],
        destination: DirectoryId,
    ) -> AppResult<Vec<Directory>> {
        let mut tx = self.pool.begin().await.map_err(begin_failed)?;

        for source_id in sources {
            let target = lock_directory(&mut *tx, destination).await?;
            let source = lock_directory(&mut *tx, *source_id).await?;
            let plan = path::plan_subtree_move(&source, &target)?;

            let files = sqlx::query(
                "UPDATE files \
                 SET full_path = $2 || substr(full_path, char_length($1) + 1), updated_at = NOW() \
                 WHERE directory_id IN ( \
                    SELECT id FROM directories \
                    WHERE id = $3 OR full_path = $4 OR starts_with(full_path, $4 || '/') \
                 )",
            )
            .bind(&plan.old_prefix)
            .bind(&plan.new_prefix)
            .bind(plan.directory_id)
            .bind(&plan.descendant_prefix)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to rewrite file paths", e))?;

            let directories = sqlx::query(
                "UPDATE directories \
                 SET full_path = $2 || substr(full_path, char_length($1) + 1), \
                     level = level + $5, \
                     parent_directory_id = CASE WHEN id = $3 THEN $6 ELSE parent_directory_id END, \
                     updated_at = NOW() \
                 WHERE id = $3 OR full_path = $4 OR starts_with(full_path, $4 || '/')",
            )
            .bind(&plan.old_prefix)
            .bind(&plan.new_prefix)
            .bind(plan.directory_id)
            .bind(&plan.descendant_prefix)
            .bind(plan.level_delta)
            .bind(plan.new_parent_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to rewrite directory paths", e)
            })?;

            debug!(
                directory_id = %plan.directory_id,
                destination_id = %plan.new_parent_id,
                directories = directories.rows_affected(),
                files = files.rows_affected(),
                "Rewrote subtree"
            );
        }

        let ids: Vec<Uuid> = sources.iter().map(|id| id.into_uuid()).collect();
        let moved = sqlx::query_as::<_, Directory>("SELECT * FROM directories WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to reload directories", e))?;

        tx.commit().await.map_err(commit_failed)?;

        Ok(sources
            .iter()
            .filter_map(|id| moved.iter().find(|d| d.id == *id).cloned())
            .collect())
    }

    async fn list_children(
        &self,
        id: DirectoryId,
        order: ChildOrder,
        page: PageRequest,
    ) -> AppResult<PageResponse<FileOrFolder>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM directories WHERE parent_directory_id = $1) \
                  + (SELECT COUNT(*) FROM files WHERE directory_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to count children", e))?;

        // Column and direction come from the ChildOrder allow-list.
        let sql = format!(
            "SELECT id, name, parent_id, is_directory, full_path, created_at, updated_at FROM ( \
                SELECT id, name, parent_directory_id AS parent_id, TRUE AS is_directory, \
                       full_path, created_at, updated_at \
                FROM directories WHERE parent_directory_id = $1 \
                UNION ALL \
                SELECT id, name, directory_id AS parent_id, FALSE AS is_directory, \
                       full_path, created_at, updated_at \
                FROM files WHERE directory_id = $1 \
             ) AS children \
             ORDER BY {} {}, id ASC \
             LIMIT $2 OFFSET $3",
            order.field.sort_expr(),
            order.direction.as_sql()
        );

        let items = sqlx::query_as::<_, FileOrFolder>(&sql)
            .bind(id)
            .bind(page.limit as i64)
            .bind(page.offset as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to list children", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }
}
