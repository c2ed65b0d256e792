//! # dam-core
//!
//! Core crate for DAM Hub. Contains configuration schemas, typed
//! identifiers, pagination/sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DAM Hub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
