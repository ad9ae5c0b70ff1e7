//! Lint for operations with an empty `x-operations` list.

use skyway_ir::OperationUnit;
use skyway_manifest::CompiledConfig;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Warns when an operation declares `x-operations: []`.
///
/// The handler is still generated; without `x-response` it answers `null`.
pub struct EmptySequenceLint;

impl Lint for EmptySequenceLint {
    fn name(&self) -> &'static str {
        "empty-sequence"
    }

    fn check(
        &self,
        _config: &CompiledConfig,
        units: &[OperationUnit],
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for unit in units.iter().filter(|u| u.steps.is_empty()) {
            let message = if unit.response.is_some() {
                format!("'{}' declares no operations", unit.id)
            } else {
                format!(
                    "'{}' declares no operations and no x-response; it will respond with null",
                    unit.id
                )
            };
            diagnostics.push(Diagnostic::warning("validate", message).at(unit.location()));
        }
    }
}
