//! User setting repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use dam_core::error::{AppError, ErrorKind};
use dam_core::result::AppResult;
use dam_core::types::{UserId, UserSettingId};
use dam_entity::settings::{CreateUserSetting, UserSetting};

use super::{begin_failed, commit_failed, map_write_error};
use crate::traits::UserSettingRepository;

/// Per-user storage settings in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserSettingRepository {
    pool: PgPool,
}

impl PgUserSettingRepository {
    /// Create a new user setting repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserSettingRepository for PgUserSettingRepository {
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<UserSetting>> {
        sqlx::query_as::<_, UserSetting>("SELECT * FROM user_settings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to find user setting", e))
    }

    async fn create(&self, data: &CreateUserSetting) -> AppResult<UserSetting> {
        let mut tx = self.pool.begin().await.map_err(begin_failed)?;

        let existing: Option<UserSettingId> =
            sqlx::query_scalar("SELECT id FROM user_settings WHERE user_id = $1 FOR UPDATE")
                .bind(data.user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Internal, "Failed to lock user setting", e)
                })?;

        if existing.is_some() {
            return Err(AppError::conflict(format!(
                "User {} already has storage settings",
                data.user_id
            )));
        }

        let setting = sqlx::query_as::<_, UserSetting>(
            "INSERT INTO user_settings \
             (id, user_id, storage_vendor, storage_credentials, storage_informations) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(UserSettingId::new())
        .bind(data.user_id)
        .bind(data.storage_vendor)
        .bind(Json(&data.storage_credentials))
        .bind(Json(&data.storage_informations))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                &format!("User {} already has storage settings", data.user_id),
                "Failed to create user setting",
            )
        })?;

        tx.commit().await.map_err(commit_failed)?;
        Ok(setting)
    }
}
