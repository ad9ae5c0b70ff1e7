//! Build operation - compile inputs into a worker.

use std::path::Path;

use eyre::{Context, Result};
use skyway_codegen::{Emitter, WriteStrategy, pipeline::Pipeline};
use skyway_codegen_worker::WorkerTarget;
use skyway_manifest::{CompiledConfig, Loaded};

use super::describe;
use crate::reports::{BuildReport, BuildResult, PreviewFile, PreviewResult, WrittenResult};

/// Options for the build operation.
pub struct BuildOptions<'a> {
    /// Output directory for the worker.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// How the output directory is replaced.
    pub strategy: WriteStrategy,
}

/// A finished build and the inputs it was compiled from.
pub struct Compiled {
    pub report: BuildReport,
    pub config: CompiledConfig,
}

/// Execute the build operation.
///
/// Runs the pipeline on the loaded inputs and renders the worker target.
pub fn build(loaded: Loaded, opts: BuildOptions) -> Result<Compiled> {
    let api_path = loaded.api_path.clone();
    let ctx = Pipeline::new()
        .run_loaded(loaded)
        .wrap_err("Compilation failed")?;

    let warnings = ctx.warnings().map(describe).collect();

    let routes = ctx.routes()?;
    let units = ctx.units()?;
    let route_count = routes.len();
    let passthrough_count = routes.iter().filter(|r| r.is_passthrough()).count();

    let emitter = Emitter::new(WorkerTarget::new()?).with_strategy(opts.strategy);
    let result = if opts.dry_run {
        let files = emitter
            .render(&ctx.config, routes, units)?
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path().display().to_string(),
                content: f.content().to_string(),
            })
            .collect();
        BuildResult::Preview(PreviewResult { files })
    } else {
        let emitted = emitter
            .emit(opts.output_dir, &ctx.config, routes, units)
            .wrap_err("Failed to write worker")?;
        BuildResult::Written(WrittenResult {
            output_dir: emitted.output_dir,
            file_count: emitted.files.len(),
            handlers: emitted.handlers,
        })
    };

    let report = BuildReport {
        api_path,
        worker_name: ctx.config.bindings.name.clone(),
        api_title: ctx.config.api.info.title.clone(),
        api_version: ctx.config.api.info.version.clone(),
        warnings,
        route_count,
        passthrough_count,
        result,
    };

    Ok(Compiled {
        report,
        config: ctx.config,
    })
}
