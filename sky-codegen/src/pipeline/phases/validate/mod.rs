//! Validate phase - checks units before anything is rendered.
//!
//! Handler ids, result names and binding references are hard checks that fail with a
//! [`CompileError`]. Everything else is a [`Lint`].

mod lint;
pub mod lints;

use std::collections::HashMap;

use eyre::{Result, bail, eyre};
pub use lint::Lint;
pub use lints::{EmptySequenceLint, FetchBindingLint, UnusedBindingLint};
use skyway_core::is_plain_file_name;
use skyway_ir::OperationUnit;
use skyway_manifest::BindingsManifest;

use crate::{
    BindingReference, CompileError,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Phase that validates operation units and runs configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a validate phase with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(EmptySequenceLint),
                Box::new(FetchBindingLint),
                Box::new(UnusedBindingLint),
            ],
        }
    }

    /// Create a validate phase with no lints. The hard checks still run.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check handler ids and binding references"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let units = ctx.units.as_deref().ok_or_else(|| {
            eyre!("operation units not set - ValidatePhase must run after LowerPhase")
        })?;

        check_unique_ids(units)?;
        check_result_names(units)?;

        let mut references = unresolved_references(units, &ctx.config.bindings);
        if !ctx.bindings_declared {
            // Without a manifest, named bindings may still exist at deploy time
            references.retain(|reference| {
                if reference.binding.is_none() {
                    return true;
                }
                ctx.diagnostics.push(
                    Diagnostic::warning("validate", reference.to_string())
                        .at(reference.class.manifest_key()),
                );
                false
            });
        }
        if !references.is_empty() {
            return Err(CompileError::UnresolvedBindingReference { references }.into());
        }

        for lint in &self.lints {
            lint.check(&ctx.config, units, &mut ctx.diagnostics);
        }

        // Fail if there are any errors (warnings are allowed)
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

/// Check that every handler id is a plain file name and unique.
pub fn check_unique_ids(units: &[OperationUnit]) -> Result<(), CompileError> {
    let mut seen: HashMap<&str, String> = HashMap::new();

    for unit in units {
        if !is_plain_file_name(&unit.id) {
            return Err(CompileError::InvalidHandlerId {
                id: unit.id.clone(),
                location: unit.location(),
            });
        }
        if let Some(first) = seen.get(unit.id.as_str()) {
            return Err(CompileError::DuplicateHandlerId {
                id: unit.id.clone(),
                first: first.clone(),
                second: unit.location(),
            });
        }
        seen.insert(&unit.id, unit.location());
    }

    Ok(())
}

/// Check that every step result name is non-empty, free of control
/// characters and unique within its unit.
pub fn check_result_names(units: &[OperationUnit]) -> Result<(), CompileError> {
    for unit in units {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (index, step) in unit.steps.iter().enumerate() {
            let name = step.name.as_str();
            if name.is_empty() || name.chars().any(char::is_control) {
                return Err(CompileError::InvalidResultName {
                    handler: unit.id.clone(),
                    name: name.to_string(),
                });
            }
            if let Some(first) = seen.insert(name, index + 1) {
                return Err(CompileError::DuplicateResultName {
                    handler: unit.id.clone(),
                    name: name.to_string(),
                    first,
                    second: index + 1,
                });
            }
        }
    }

    Ok(())
}

/// Every step binding that is missing or not declared for its class.
pub fn unresolved_references(
    units: &[OperationUnit],
    bindings: &BindingsManifest,
) -> Vec<BindingReference> {
    units
        .iter()
        .flat_map(|unit| {
            unit.resource_steps().filter_map(move |(_, step, class)| {
                let binding = step.binding.as_ref().map(|b| b.name.clone());
                let resolved = binding
                    .as_deref()
                    .is_some_and(|name| bindings.contains(class, name));
                (!resolved).then(|| BindingReference {
                    handler: unit.id.clone(),
                    step: step.name.clone(),
                    class,
                    binding,
                })
            })
        })
        .collect()
}
