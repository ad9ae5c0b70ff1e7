//! Built-in pipeline phases.
//!
//! - [`LowerPhase`] - builds operation units from the API description
//! - [`ValidatePhase`] - hard checks on units, then lints
//! - [`AnalyzePhase`] - derives the routing table

mod analyze;
mod lower;
mod validate;

pub use analyze::{AnalyzePhase, build_routes};
pub use lower::{LowerPhase, build_units};
pub use validate::{
    EmptySequenceLint, FetchBindingLint, Lint, UnusedBindingLint, ValidatePhase,
    check_result_names, check_unique_ids, unresolved_references,
};
