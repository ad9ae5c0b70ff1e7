//! Artifact rendering and emission.
//!
//! A [`Target`] decides which artifacts exist and how they are rendered; the
//! [`Emitter`] renders all of them in memory, then hands them to a
//! [`WriteStrategy`].

use std::path::{Path, PathBuf};

use eyre::Result;
use serde::Serialize;
use skyway_core::File;
use skyway_ir::{OperationStep, OperationUnit, ResolvedDefaults, ResponseShape, Route};
use skyway_manifest::CompiledConfig;

use crate::{CompileError, WriteStrategy, build_dir::HANDLERS_DIR};

/// Data every global artifact is rendered with.
#[derive(Debug, Serialize)]
pub struct GlobalData<'a> {
    #[serde(flatten)]
    pub config: &'a CompiledConfig,
    pub routes: &'a [Route],
}

/// Data a handler artifact is rendered with. Nothing else about the unit
/// reaches the template.
#[derive(Debug, Serialize)]
pub struct HandlerData<'a> {
    pub steps: &'a [OperationStep],
    pub response: Option<&'a ResponseShape>,
    pub defaults: &'a ResolvedDefaults,
}

impl<'a> From<&'a OperationUnit> for HandlerData<'a> {
    fn from(unit: &'a OperationUnit) -> Self {
        Self {
            steps: &unit.steps,
            response: unit.response.as_ref(),
            defaults: &unit.defaults,
        }
    }
}

/// A set of artifacts for one execution platform.
pub trait Target {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// File extension of handler artifacts, without the dot.
    fn handler_extension(&self) -> &'static str;

    /// Names of the global artifacts, in render order.
    fn global_artifacts(&self) -> &[&'static str];

    /// Render one global artifact.
    fn render_global(&self, artifact: &str, data: &GlobalData<'_>) -> Result<String>;

    /// Render one handler artifact.
    fn render_handler(&self, data: &HandlerData<'_>) -> Result<String>;
}

/// Summary of an emitted build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    pub output_dir: PathBuf,
    /// Artifact paths relative to `output_dir`, in render order.
    pub files: Vec<PathBuf>,
    /// Handler ids, in unit order.
    pub handlers: Vec<String>,
}

/// Renders a target's artifacts and writes them out.
pub struct Emitter<T> {
    target: T,
    strategy: WriteStrategy,
}

impl<T: Target> Emitter<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            strategy: WriteStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Render every artifact without touching disk.
    pub fn render(
        &self,
        config: &CompiledConfig,
        routes: &[Route],
        units: &[OperationUnit],
    ) -> Result<Vec<File>, CompileError> {
        let data = GlobalData { config, routes };
        let mut files = Vec::with_capacity(self.target.global_artifacts().len() + units.len());

        for artifact in self.target.global_artifacts() {
            let content = self
                .target
                .render_global(artifact, &data)
                .map_err(|e| render_error(artifact, e))?;
            files.push(File::new(*artifact, content));
        }

        for unit in units {
            let path = Path::new(HANDLERS_DIR)
                .join(format!("{}.{}", unit.id, self.target.handler_extension()));
            let content = self
                .target
                .render_handler(&HandlerData::from(unit))
                .map_err(|e| render_error(&path.display().to_string(), e))?;
            files.push(File::new(path, content));
        }

        Ok(files)
    }

    /// Render every artifact, then replace the output directory with them.
    ///
    /// A render failure leaves the output directory untouched.
    pub fn emit(
        &self,
        output_dir: &Path,
        config: &CompiledConfig,
        routes: &[Route],
        units: &[OperationUnit],
    ) -> Result<EmitReport, CompileError> {
        let files = self.render(config, routes, units)?;

        self.strategy.write(output_dir, &files)?;

        // One event per handler, in render order
        for unit in units {
            tracing::info!(
                platform = self.target.name(),
                handler = %unit.id,
                "generated handler"
            );
        }

        Ok(EmitReport {
            output_dir: output_dir.to_path_buf(),
            files: files.iter().map(|f| f.path().to_path_buf()).collect(),
            handlers: units.iter().map(|u| u.id.clone()).collect(),
        })
    }
}

fn render_error(artifact: &str, error: eyre::Report) -> CompileError {
    CompileError::Render {
        artifact: artifact.to_string(),
        message: format!("{error:#}"),
    }
}
