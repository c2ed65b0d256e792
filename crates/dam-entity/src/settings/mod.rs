//! Per-user storage settings.

pub mod model;

pub use model::{
    CreateUserSetting, StorageCredentials, StorageInformation, StorageVendor, UserSetting,
};
