//! Lint trait for non-fatal checks.

use skyway_ir::OperationUnit;
use skyway_manifest::CompiledConfig;

use crate::pipeline::Diagnostic;

/// A check that reports diagnostics without stopping compilation on its own.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// Check the inputs and lowered units, adding any diagnostics.
    fn check(
        &self,
        config: &CompiledConfig,
        units: &[OperationUnit],
        diagnostics: &mut Vec<Diagnostic>,
    );
}
