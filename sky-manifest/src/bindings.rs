//! Typed model of `wrangler.toml`.

use std::{collections::BTreeMap, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use skyway_ir::ResourceClass;

use crate::{Error, Result, error::SourceContext};

/// Infrastructure bindings declared for the worker.
///
/// Only binding tables and a few top-level keys are read; anything else in
/// the manifest is left to wrangler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingsManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_date: Option<String>,

    #[serde(default)]
    pub d1_databases: Vec<D1Database>,
    #[serde(default)]
    pub kv_namespaces: Vec<KvNamespace>,
    #[serde(default)]
    pub r2_buckets: Vec<R2Bucket>,

    /// Plain variables, passed through to templates.
    #[serde(default)]
    pub vars: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct D1Database {
    pub binding: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
}

impl D1Database {
    /// Name wrangler accepts for `d1 execute`; falls back to the binding.
    pub fn target_name(&self) -> &str {
        self.database_name.as_deref().unwrap_or(&self.binding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvNamespace {
    pub binding: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct R2Bucket {
    pub binding: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
}

impl BindingsManifest {
    /// Parse a manifest from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a manifest with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(content, filename);
        toml::from_str(content).map_err(|e| source_ctx.toml_error(e))
    }

    /// Declared binding names for a resource class, in manifest order.
    pub fn binding_names(&self, class: ResourceClass) -> Vec<&str> {
        match class {
            ResourceClass::D1 => self.d1_databases.iter().map(|d| d.binding.as_str()).collect(),
            ResourceClass::Kv => self.kv_namespaces.iter().map(|k| k.binding.as_str()).collect(),
            ResourceClass::R2 => self.r2_buckets.iter().map(|r| r.binding.as_str()).collect(),
        }
    }

    /// Whether `name` is declared as a binding of `class`.
    pub fn contains(&self, class: ResourceClass, name: &str) -> bool {
        self.binding_names(class).contains(&name)
    }

    /// First declared D1 database, the target of data-initialization scripts.
    pub fn primary_database(&self) -> Option<&D1Database> {
        self.d1_databases.first()
    }

    /// Whether no bindings of any class are declared.
    pub fn is_empty(&self) -> bool {
        self.d1_databases.is_empty() && self.kv_namespaces.is_empty() && self.r2_buckets.is_empty()
    }
}

impl FromStr for BindingsManifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "wrangler.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
name = "e2e-test-api"
main = "build/index.js"
compatibility_date = "2024-01-01"

[vars]
API_VERSION = "v1"
MAX_ITEMS = 50

[[d1_databases]]
binding = "TEST_DB"
database_name = "test-db"
database_id = "00000000-0000-0000-0000-000000000000"

[[kv_namespaces]]
binding = "TEST_KV"
id = "kv-id"

[[r2_buckets]]
binding = "TEST_BUCKET"
bucket_name = "test-bucket"

[observability]
enabled = true
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest: BindingsManifest = MANIFEST.parse().unwrap();

        assert_eq!(manifest.name.as_deref(), Some("e2e-test-api"));
        assert_eq!(manifest.binding_names(ResourceClass::D1), vec!["TEST_DB"]);
        assert_eq!(manifest.binding_names(ResourceClass::Kv), vec!["TEST_KV"]);
        assert_eq!(manifest.binding_names(ResourceClass::R2), vec!["TEST_BUCKET"]);
        assert_eq!(manifest.vars["MAX_ITEMS"], serde_json::json!(50));
        assert!(!manifest.is_empty());
    }

    #[test]
    fn test_contains_checks_class() {
        let manifest: BindingsManifest = MANIFEST.parse().unwrap();

        assert!(manifest.contains(ResourceClass::Kv, "TEST_KV"));
        assert!(!manifest.contains(ResourceClass::D1, "TEST_KV"));
        assert!(!manifest.contains(ResourceClass::R2, "OTHER"));
    }

    #[test]
    fn test_primary_database_target_name() {
        let manifest: BindingsManifest = MANIFEST.parse().unwrap();
        assert_eq!(manifest.primary_database().unwrap().target_name(), "test-db");

        let manifest: BindingsManifest = "[[d1_databases]]\nbinding = \"DB\"".parse().unwrap();
        assert_eq!(manifest.primary_database().unwrap().target_name(), "DB");
    }

    #[test]
    fn test_empty_manifest() {
        let manifest: BindingsManifest = "".parse().unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.primary_database().is_none());
    }

    #[test]
    fn test_malformed_manifest_has_span() {
        let err = "[[d1_databases]]\nbinding = ".parse::<BindingsManifest>().unwrap_err();
        assert!(matches!(*err, Error::Toml { span: Some(_), .. }));
    }
}
