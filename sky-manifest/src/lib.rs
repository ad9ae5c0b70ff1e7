//! Input loading for the skyway Worker generator.
//!
//! Parses the API description (OpenAPI YAML with `x-operations`,
//! `x-response` and `x-defaults`), the `wrangler.toml` bindings manifest and
//! an optional `.env` override file into a [`CompiledConfig`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod api;
mod bindings;
mod env;
mod error;
mod load;

pub use api::{ApiDescription, Defaults, Info, OperationEntry, PathItem, StepDoc};
pub use bindings::{BindingsManifest, D1Database, KvNamespace, R2Bucket};
pub use env::{EnvFile, EnvParseError, merge_env};
pub use error::{Error, Result, SourceContext};
pub use load::{
    CompiledConfig, DEFAULT_BINDINGS_FILE, DEFAULT_ENV_FILE, LoadWarning, Loaded, Loader,
};
