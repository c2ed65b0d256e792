//! Per-user storage settings.

pub mod service;

pub use service::{CreateUserSettingRequest, UserSettingService};
