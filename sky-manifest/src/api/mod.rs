//! Typed model of the API description (OpenAPI + skyway extensions).

mod path_item;

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
pub use path_item::PathItem;
use serde::{Deserialize, Deserializer, Serialize};
use skyway_ir::{Action, HttpMethod, ResolvedDefaults, ResponseShape};

use crate::{Error, Result, error::SourceContext};

/// Root of an API description document.
///
/// Only the parts the compiler acts on are modelled; everything else in the
/// document is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDescription {
    /// OpenAPI version string.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub openapi: Option<String>,

    #[serde(default)]
    pub info: Info,

    /// Path → method → operation, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Document-level fallback bindings (`x-defaults`).
    #[serde(rename = "x-defaults", default)]
    pub defaults: Defaults,
}

/// The `info` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The `x-defaults` object: one default binding name per resource class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r2: Option<String>,
}

impl Defaults {
    /// Snapshot these defaults for one operation unit.
    pub fn resolve(&self) -> ResolvedDefaults {
        ResolvedDefaults {
            d1: self.d1.clone(),
            kv: self.kv.clone(),
            r2: self.r2.clone(),
        }
    }
}

/// An operation object under a path item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationEntry {
    #[serde(
        rename = "operationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// The operation sequence. `None` means a passthrough route.
    #[serde(
        rename = "x-operations",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operations: Option<Vec<StepDoc>>,

    #[serde(rename = "x-response", default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseShape>,
}

/// One entry of `x-operations`, as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDoc {
    /// Explicit binding; inherits from `x-defaults` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,

    /// Name to store the step result under.
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    #[serde(flatten)]
    pub action: Action,
}

impl ApiDescription {
    /// Parse an API description from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse an API description with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(content, filename);
        // An empty document parses as YAML null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| source_ctx.yaml_error(e))
    }

    /// Every `(path, method, entry)` triple, in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &OperationEntry)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.iter()
                .map(move |(method, entry)| (path.as_str(), method, entry))
        })
    }
}

impl FromStr for ApiDescription {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "api.yaml")
    }
}

/// Accept `3.0`, `1` or `"1.0.0"` alike; YAML turns unquoted versions into numbers.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }))
}
