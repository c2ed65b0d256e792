//! Directory tree and listing configuration.

use serde::{Deserialize, Serialize};

/// Directory tree settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Base `full_path` given to every root directory. Children of a root
    /// get `root_path + "/" + root_id`.
    #[serde(default)]
    pub root_path: String,
}

/// Child listing (pagination) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Page size used when the caller does not send a limit.
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    /// Largest accepted page size.
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u64 {
    10
}

fn default_max_limit() -> u64 {
    100
}
