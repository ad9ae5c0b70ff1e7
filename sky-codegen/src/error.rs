use std::{fmt, path::PathBuf};

use skyway_ir::ResourceClass;
use thiserror::Error;

/// Fatal compilation errors raised after loading.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid handler id '{id}' at {location}: ids must be usable as a file name")]
    InvalidHandlerId { id: String, location: String },

    #[error("duplicate handler id '{id}': declared at {first} and {second}")]
    DuplicateHandlerId {
        id: String,
        first: String,
        second: String,
    },

    #[error("invalid result name {name:?} in '{handler}': empty or contains control characters")]
    InvalidResultName { handler: String, name: String },

    #[error("duplicate result name '{name}' in '{handler}': steps {first} and {second}")]
    DuplicateResultName {
        handler: String,
        name: String,
        first: usize,
        second: usize,
    },

    #[error("{} unresolved binding reference(s):{}", references.len(), list(references))]
    UnresolvedBindingReference { references: Vec<BindingReference> },

    #[error("failed to render '{artifact}': {message}")]
    Render { artifact: String, message: String },

    #[error("failed to write '{path}'")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    pub(crate) fn write(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CompileError::ArtifactWrite { path, source }
    }
}

/// A step whose binding cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingReference {
    /// Handler id of the unit.
    pub handler: String,
    /// Result name of the step.
    pub step: String,
    pub class: ResourceClass,
    /// The referenced name, or `None` when neither the step nor `x-defaults`
    /// names one.
    pub binding: Option<String>,
}

impl fmt::Display for BindingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binding {
            Some(name) => write!(
                f,
                "{} step '{}': '{name}' is not declared in {}",
                self.handler,
                self.step,
                self.class.manifest_key()
            ),
            None => write!(
                f,
                "{} step '{}': no binding given and no x-defaults.{}",
                self.handler, self.step, self.class
            ),
        }
    }
}

fn list(references: &[BindingReference]) -> String {
    references.iter().map(|r| format!("\n  - {r}")).collect()
}
