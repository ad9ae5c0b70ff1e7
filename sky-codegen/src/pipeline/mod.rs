//! Compilation pipeline.
//!
//! A [`Pipeline`] runs the phases between loading and emission:
//!
//! - Lower: API description → operation units, with defaults resolved
//! - Validate: handler ids and binding references, plus warning lints
//! - Analyze: the routing table for every `(path, method)`
//!
//! # Example
//!
//! ```ignore
//! use skyway_codegen::pipeline::Pipeline;
//!
//! let loaded = Loader::new(".").load("api.yaml")?;
//! let ctx = Pipeline::new().run_loaded(loaded)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
