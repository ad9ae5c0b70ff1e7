//! Intermediate representation types for the skyway Worker generator.
//!
//! This crate provides the type definitions shared across the skyway
//! code generation pipeline: the step vocabulary that API descriptions use
//! to declare backend work, and the normalized operation units and routes
//! that artifact targets consume.
//!
//! # Architecture
//!
//! ```text
//! api.yaml + wrangler.toml → skyway-manifest (parsing) → skyway-ir (units, routes) → codegen
//! ```
//!
//! The IR types are designed to be:
//! - Target-agnostic (no JavaScript-specific concerns)
//! - Serializable, so templates can consume them directly
//! - Deterministic when serialized (ordered maps only)

mod action;
mod method;
mod route;
mod unit;

pub use action::{
    Action, FetchParams, KeyParams, KvGetParams, KvPutParams, KvValueType, R2PutParams,
    ResourceClass, SqlParams,
};
pub use method::{HttpMethod, ParseMethodError};
pub use route::{Route, Segment};
pub use unit::{
    Binding, BindingSource, OperationStep, OperationUnit, ResolvedDefaults, ResponseShape,
};
