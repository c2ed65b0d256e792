//! Storage settings registration and lookup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_database::UserSettingRepository;
use dam_entity::settings::{
    CreateUserSetting, StorageCredentials, StorageInformation, StorageVendor, UserSetting,
};

use crate::context::RequestContext;

/// Manages one storage settings record per user.
#[derive(Debug, Clone)]
pub struct UserSettingService {
    settings: Arc<dyn UserSettingRepository>,
}

/// Request to register the caller's storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserSettingRequest {
    /// Vendor wire name; only `amazon_s3` is supported.
    pub storage_vendor: String,
    pub bucket_name: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl CreateUserSettingRequest {
    fn validate(&self) -> AppResult<StorageVendor> {
        let vendor = StorageVendor::parse(&self.storage_vendor).ok_or_else(|| {
            AppError::invalid_argument(format!(
                "Unsupported storage vendor '{}'",
                self.storage_vendor
            ))
        })?;

        let required = [
            ("bucket_name", &self.bucket_name),
            ("region", &self.region),
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AppError::invalid_argument(format!(
                "{field} is required for {}",
                vendor.as_str()
            )));
        }
        Ok(vendor)
    }
}

impl UserSettingService {
    /// Creates a new user setting service.
    pub fn new(settings: Arc<dyn UserSettingRepository>) -> Self {
        Self { settings }
    }

    /// Registers the caller's storage settings. A second call is a `Conflict`.
    pub async fn create_setting(
        &self,
        ctx: &RequestContext,
        req: CreateUserSettingRequest,
    ) -> AppResult<UserSetting> {
        let vendor = req.validate()?;

        let setting = self
            .settings
            .create(&CreateUserSetting {
                user_id: ctx.user_id,
                storage_vendor: vendor,
                storage_credentials: StorageCredentials {
                    access_key_id: req.access_key_id,
                    secret_access_key: req.secret_access_key,
                },
                storage_informations: StorageInformation {
                    bucket_name: req.bucket_name,
                    region: req.region,
                },
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            setting_id = %setting.id,
            vendor = vendor.as_str(),
            "Storage settings created"
        );
        Ok(setting)
    }

    /// Returns the caller's storage settings.
    pub async fn get_setting(&self, ctx: &RequestContext) -> AppResult<UserSetting> {
        self.settings
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("User {} has no storage settings", ctx.user_id))
            })
    }
}
