//! Compilation pipeline and artifact emission for the skyway Worker generator.
//!
//! This crate turns a loaded [`CompiledConfig`](skyway_manifest::CompiledConfig)
//! into operation units and routes, validates them, and writes rendered
//! artifacts into a freshly reset output directory.
//!
//! # Module Organization
//!
//! - [`pipeline`] - Phases (lower → validate → analyze) and diagnostics
//! - [`emit`] - The [`Target`] seam and the [`Emitter`] that renders and writes
//! - [`build_dir`] - Output directory reset and write strategies
//! - [`naming`] - Handler id derivation

pub mod build_dir;
pub mod emit;
mod error;
pub mod naming;
pub mod pipeline;

#[cfg(test)]
mod testing;

pub use build_dir::{BuildDir, WriteStrategy};
pub use emit::{EmitReport, Emitter, GlobalData, HandlerData, Target};
pub use error::{BindingReference, CompileError};
