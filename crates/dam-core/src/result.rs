//! Convenience result type alias for DAM Hub.

use crate::error::AppError;

/// A specialized `Result` type for DAM Hub operations.
pub type AppResult<T> = Result<T, AppError>;
