//! `AuthUser` extractor: reads the caller identity set by the gateway.
//!
//! Authentication itself happens upstream. The gateway forwards the
//! authenticated user's id in `x-user-id` and may add `x-request-id`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dam_core::error::AppError;
use dam_core::types::UserId;
use dam_service::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the gateway correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthenticated("Missing x-user-id header"))?;

        let user_id: UserId = raw
            .trim()
            .parse()
            .map_err(|_| AppError::unauthenticated("Malformed x-user-id header"))?;

        let mut ctx = RequestContext::new(user_id);
        if let Some(request_id) = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            ctx = ctx.with_request_id(request_id);
        }

        Ok(AuthUser(ctx))
    }
}
