//! Lint for `binding` written on `fetch` steps.

use skyway_ir::{Action, OperationUnit};
use skyway_manifest::CompiledConfig;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Warns that a `binding` on a `fetch` step has no effect.
pub struct FetchBindingLint;

impl Lint for FetchBindingLint {
    fn name(&self) -> &'static str {
        "fetch-binding"
    }

    fn check(
        &self,
        config: &CompiledConfig,
        _units: &[OperationUnit],
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for (path, method, entry) in config.api.operations() {
            let Some(steps) = &entry.operations else {
                continue;
            };
            for (index, step) in steps.iter().enumerate() {
                if let (Action::Fetch(_), Some(binding)) = (&step.action, &step.binding) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!("binding '{binding}' on a fetch step is ignored"),
                        )
                        .at(format!("paths.{path}.{method}.x-operations[{index}]")),
                    );
                }
            }
        }
    }
}
