//! Input checks shared by the services.

use dam_core::error::AppError;
use dam_core::result::AppResult;

/// Trim a directory or file name and reject empty names or names with `/`.
pub(crate) fn clean_name(raw: &str, what: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::invalid_argument(format!("{what} name cannot be empty")));
    }
    if name.contains('/') {
        return Err(AppError::invalid_argument(format!(
            "{what} name cannot contain '/'"
        )));
    }
    Ok(name.to_string())
}

pub(crate) fn check_size(size_bytes: i64) -> AppResult<()> {
    if size_bytes < 0 {
        return Err(AppError::invalid_argument(format!(
            "size must not be negative, got {size_bytes}"
        )));
    }
    Ok(())
}
