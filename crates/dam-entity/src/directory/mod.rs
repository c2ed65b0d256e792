//! Directory domain entities.

pub mod listing;
pub mod model;

pub use listing::FileOrFolder;
pub use model::{CreateDirectory, Directory};
