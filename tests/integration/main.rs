//! HTTP-level integration tests, run against the in-memory store.

mod helpers;

mod directory_test;
mod file_test;
mod settings_test;
