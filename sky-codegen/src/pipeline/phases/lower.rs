//! Lower phase - turns the API description into operation units.

use eyre::Result;
use skyway_ir::{Binding, OperationStep, OperationUnit, ResolvedDefaults};
use skyway_manifest::{ApiDescription, StepDoc};

use crate::{
    naming::handler_id,
    pipeline::{CompilationContext, Phase},
};

/// Phase that builds one [`OperationUnit`] per entry carrying `x-operations`.
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Build operation units from the API description"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let units = build_units(&ctx.config.api);
        tracing::debug!(units = units.len(), "lowered operation units");
        ctx.units = Some(units);
        Ok(())
    }
}

/// Build operation units in document order.
///
/// Entries without `x-operations` are passthrough routes and produce no
/// unit. Bindings are resolved against `x-defaults` but not checked against
/// the manifest.
pub fn build_units(api: &ApiDescription) -> Vec<OperationUnit> {
    api.operations()
        .filter_map(|(path, method, entry)| {
            let steps = entry.operations.as_ref()?;
            let defaults = api.defaults.resolve();
            Some(OperationUnit {
                id: handler_id(entry.operation_id.as_deref(), path, method),
                method,
                path: path.to_string(),
                steps: lower_steps(steps, &defaults),
                response: entry.response.clone(),
                defaults,
            })
        })
        .collect()
}

fn lower_steps(steps: &[StepDoc], defaults: &ResolvedDefaults) -> Vec<OperationStep> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| OperationStep {
            name: step
                .result
                .clone()
                .unwrap_or_else(|| format!("step{}", index + 1)),
            binding: resolve_binding(step, defaults),
            action: step.action.clone(),
        })
        .collect()
}

fn resolve_binding(step: &StepDoc, defaults: &ResolvedDefaults) -> Option<Binding> {
    let class = step.action.resource_class()?;
    match &step.binding {
        Some(name) => Some(Binding::explicit(name)),
        None => defaults.for_class(class).map(Binding::inherited),
    }
}
