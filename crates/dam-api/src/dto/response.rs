//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dam_core::types::{UserId, UserSettingId};
use dam_entity::settings::{StorageVendor, UserSetting};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `connected`, `unavailable`, or `memory`.
    pub database: String,
}

/// A user's storage settings without the credential pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettingResponse {
    pub id: UserSettingId,
    pub user_id: UserId,
    pub storage_vendor: StorageVendor,
    pub bucket_name: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserSetting> for UserSettingResponse {
    fn from(setting: UserSetting) -> Self {
        let info = setting.storage_informations.0;
        Self {
            id: setting.id,
            user_id: setting.user_id,
            storage_vendor: setting.storage_vendor,
            bucket_name: info.bucket_name,
            region: info.region,
            created_at: setting.created_at,
            updated_at: setting.updated_at,
        }
    }
}
