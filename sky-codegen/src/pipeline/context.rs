//! Compilation context passed through pipeline phases.

use eyre::{Result, eyre};
use skyway_ir::{OperationUnit, Route};
use skyway_manifest::{CompiledConfig, LoadWarning, Loaded};

use super::diagnostic::{Diagnostic, Severity};

/// State carried through every pipeline phase.
#[derive(Debug)]
pub struct CompilationContext {
    /// The merged inputs being compiled.
    pub config: CompiledConfig,
    /// Whether a bindings manifest was found. Without one, references to
    /// undeclared bindings are reported as warnings instead of errors.
    pub bindings_declared: bool,
    /// Operation units (populated by LowerPhase).
    pub units: Option<Vec<OperationUnit>>,
    /// Routing table (populated by AnalyzePhase).
    pub routes: Option<Vec<Route>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(config: CompiledConfig) -> Self {
        Self {
            config,
            bindings_declared: true,
            units: None,
            routes: None,
            diagnostics: Vec::new(),
        }
    }

    /// Create a context from a load result, carrying its warnings over as
    /// `load` diagnostics.
    pub fn from_loaded(loaded: Loaded) -> Self {
        let mut ctx = Self::new(loaded.config);
        for warning in &loaded.warnings {
            if matches!(warning, LoadWarning::BindingsManifestMissing { .. }) {
                ctx.bindings_declared = false;
            }
            ctx.diagnostics.push(Diagnostic::from(warning));
        }
        ctx
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Operation units, or an error if LowerPhase has not run.
    pub fn units(&self) -> Result<&[OperationUnit]> {
        self.units
            .as_deref()
            .ok_or_else(|| eyre!("operation units not set - did LowerPhase run?"))
    }

    /// Routes, or an error if AnalyzePhase has not run.
    pub fn routes(&self) -> Result<&[Route]> {
        self.routes
            .as_deref()
            .ok_or_else(|| eyre!("routes not set - did AnalyzePhase run?"))
    }
}
