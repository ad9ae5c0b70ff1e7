//! Core operations.
//!
//! This module contains the business logic for skyway commands,
//! separated from CLI argument parsing and output rendering.

pub mod build;
pub mod check;
pub mod wrangler;

use std::path::Path;

pub use build::build;
pub use check::check;
use skyway_codegen::pipeline::Diagnostic;
use skyway_manifest::{Loaded, Loader};

/// Load every compiler input below `root`, merging the process environment
/// with the `.env` override file.
pub fn load(root: &Path, api_file: &Path) -> skyway_manifest::Result<Loaded> {
    Loader::new(root)
        .ambient_env(std::env::vars())
        .load(api_file)
}

/// One diagnostic as shown to the user.
fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}
