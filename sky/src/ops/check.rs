//! Check operation - input validation.

use eyre::{Context, Result};
use skyway_codegen::pipeline::{Pipeline, Severity};
use skyway_manifest::Loaded;

use super::describe;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline on the loaded inputs and returns its diagnostics.
pub fn check(loaded: Loaded) -> Result<CheckReport> {
    let api_path = loaded.api_path.clone();
    let ctx = Pipeline::new()
        .run_loaded(loaded)
        .wrap_err("Validation failed")?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = describe(diag);
        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    let handlers = ctx.units()?.iter().map(|u| u.id.clone()).collect();
    let routes = ctx.routes()?;

    Ok(CheckReport {
        api_path,
        errors,
        warnings,
        infos,
        handlers,
        route_count: routes.len(),
    })
}
