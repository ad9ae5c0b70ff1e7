//! Operation units: one per generated handler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Action, HttpMethod, ResourceClass};

/// A normalized operation with a generated handler.
///
/// Derived from a `(path, method)` entry that carries `x-operations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationUnit {
    /// Stable handler identifier; also the handler file stem.
    pub id: String,
    /// Method of the originating entry.
    pub method: HttpMethod,
    /// Path of the originating entry, as written in the document.
    pub path: String,
    /// Steps in document order.
    pub steps: Vec<OperationStep>,
    /// Declared response shape, if any.
    pub response: Option<ResponseShape>,
    /// Defaults this unit resolved its steps against.
    pub defaults: ResolvedDefaults,
}

impl OperationUnit {
    /// Steps that act on a resource class, with their position.
    pub fn resource_steps(&self) -> impl Iterator<Item = (usize, &OperationStep, ResourceClass)> {
        self.steps
            .iter()
            .enumerate()
            .filter_map(|(i, step)| step.action.resource_class().map(|class| (i, step, class)))
    }

    /// Location of this unit in the API description, e.g. `paths./users.get`.
    pub fn location(&self) -> String {
        format!("paths.{}.{}", self.path, self.method)
    }
}

/// One resolved step of an operation sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationStep {
    /// Name the step result is stored under (`results.<name>`).
    pub name: String,
    /// Resolved binding; `None` for `fetch` and for unbound steps.
    pub binding: Option<Binding>,
    #[serde(flatten)]
    pub action: Action,
}

/// A binding reference after default resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub name: String,
    pub source: BindingSource,
}

impl Binding {
    pub fn explicit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: BindingSource::Explicit,
        }
    }

    pub fn inherited(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: BindingSource::Default,
        }
    }
}

/// Where a step's binding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingSource {
    /// Written on the step.
    Explicit,
    /// Inherited from `x-defaults`.
    Default,
}

/// Default binding names per resource class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDefaults {
    #[serde(default)]
    pub d1: Option<String>,
    #[serde(default)]
    pub kv: Option<String>,
    #[serde(default)]
    pub r2: Option<String>,
}

impl ResolvedDefaults {
    /// The default binding for a resource class.
    pub fn for_class(&self, class: ResourceClass) -> Option<&str> {
        match class {
            ResourceClass::D1 => self.d1.as_deref(),
            ResourceClass::Kv => self.kv.as_deref(),
            ResourceClass::R2 => self.r2.as_deref(),
        }
    }
}

/// Response declared by `x-response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseShape {
    #[serde(default = "default_status")]
    pub status: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<Value>,
}

fn default_status() -> u16 {
    200
}
