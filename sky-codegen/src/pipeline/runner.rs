//! Pipeline orchestrator.

use eyre::Result;
use skyway_manifest::{CompiledConfig, Loaded};

use super::{
    CompilationContext, Phase,
    phases::{AnalyzePhase, LowerPhase, ValidatePhase},
};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (lower, validate, analyze) followed by any
/// extra phases.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new().phase(MyCustomPhase).run(config)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
        }
    }

    /// Replace the built-in validate phase (e.g. to change its lints).
    pub fn validate(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Run the pipeline on merged inputs.
    pub fn run(&self, config: CompiledConfig) -> Result<CompilationContext> {
        self.run_context(CompilationContext::new(config))
    }

    /// Run the pipeline on a load result, keeping its warnings.
    pub fn run_loaded(&self, loaded: Loaded) -> Result<CompilationContext> {
        self.run_context(CompilationContext::from_loaded(loaded))
    }

    /// Run every phase in order on an existing context.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run_context(&self, mut ctx: CompilationContext) -> Result<CompilationContext> {
        let builtin: [&dyn Phase; 3] = [&LowerPhase, &self.validate, &AnalyzePhase];
        let extra = self.phases.iter().map(|p| p.as_ref());

        for phase in builtin.into_iter().chain(extra) {
            tracing::debug!(phase = phase.name(), "{}", phase.description());
            phase.run(&mut ctx)?;
        }

        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
