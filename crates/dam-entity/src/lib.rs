//! # dam-entity
//!
//! Domain entity models for DAM Hub. Every struct in this crate is either a
//! database row (deriving `sqlx::FromRow`) or a value object built from
//! rows. The [`path`] module holds the pure `full_path` arithmetic shared by
//! the directory and file managers.

pub mod directory;
pub mod file;
pub mod path;
pub mod settings;
