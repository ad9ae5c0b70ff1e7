//! Core utilities and types for the skyway Worker generator.
//!
//! This crate provides fundamental types and utilities used across
//! the skyway crates.

mod file;
mod utils;

// File operations
pub use file::File;
// String utilities
pub use utils::{is_plain_file_name, to_js_identifier};
