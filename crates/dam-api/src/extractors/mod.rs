//! Custom Axum extractors.

pub mod auth;
pub mod params;
pub mod query;
pub mod validated;

pub use auth::AuthUser;
pub use params::{IdPath, ListQuery};
pub use query::ListChildrenQuery;
pub use validated::ValidatedJson;
