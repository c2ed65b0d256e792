//! Process-local persistence backend.

pub mod store;

pub use store::MemoryStore;
