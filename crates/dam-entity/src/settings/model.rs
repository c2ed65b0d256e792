//! User setting entity model.

use chrono::{DateTime, Utc};
use dam_core::types::{UserId, UserSettingId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Object storage vendor a user's content lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "storage_vendor", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StorageVendor {
    /// Amazon S3.
    AmazonS3,
}

impl StorageVendor {
    /// Wire name of the vendor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AmazonS3 => "amazon_s3",
        }
    }

    /// Parse a wire name, returning `None` for unsupported vendors.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "amazon_s3" => Some(Self::AmazonS3),
            _ => None,
        }
    }
}

/// Access keys for the storage vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Where the user's objects are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInformation {
    pub bucket_name: String,
    pub region: String,
}

/// A user's storage settings row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSetting {
    /// Unique setting identifier.
    pub id: UserSettingId,
    /// Owning user; at most one row per user.
    pub user_id: UserId,
    /// Storage vendor.
    pub storage_vendor: StorageVendor,
    /// Vendor credentials (JSON).
    pub storage_credentials: sqlx::types::Json<StorageCredentials>,
    /// Bucket and region (JSON).
    pub storage_informations: sqlx::types::Json<StorageInformation>,
    /// When the setting was created.
    pub created_at: DateTime<Utc>,
    /// When the setting was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a user setting.
#[derive(Debug, Clone)]
pub struct CreateUserSetting {
    pub user_id: UserId,
    pub storage_vendor: StorageVendor,
    pub storage_credentials: StorageCredentials,
    pub storage_informations: StorageInformation,
}
