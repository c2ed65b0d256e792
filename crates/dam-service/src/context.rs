//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the HTTP extractor (or the CLI) and passed into every service
/// method so each operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Correlation id forwarded by the gateway, if any.
    pub request_id: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_id: None,
            request_time: Utc::now(),
        }
    }

    /// Attaches a correlation id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Fails with `PermissionDenied` unless the caller is `owner`.
    pub fn require_owner(&self, owner: UserId, what: &str) -> AppResult<()> {
        if self.user_id == owner {
            Ok(())
        } else {
            Err(AppError::permission_denied(format!(
                "Insufficient permission on {what}"
            )))
        }
    }
}
