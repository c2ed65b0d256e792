//! File domain entities.

pub mod model;
pub mod version;

pub use model::{CreateFile, File, FileWithVersions};
pub use version::{CreateFileVersion, FileVersion};
