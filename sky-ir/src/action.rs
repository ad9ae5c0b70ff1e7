//! The step vocabulary of `x-operations`.
//!
//! Each step names an `action` and carries the parameters that action needs.
//! String parameters may contain `${path}` placeholders; they are resolved by
//! the generated code at request time, never by the compiler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Class of infrastructure resource a step acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceClass {
    /// D1 database.
    D1,
    /// KV namespace.
    Kv,
    /// R2 bucket.
    R2,
}

impl ResourceClass {
    /// The `x-defaults` key for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceClass::D1 => "d1",
            ResourceClass::Kv => "kv",
            ResourceClass::R2 => "r2",
        }
    }

    /// The wrangler.toml table that declares bindings of this class.
    pub fn manifest_key(&self) -> &'static str {
        match self {
            ResourceClass::D1 => "d1_databases",
            ResourceClass::Kv => "kv_namespaces",
            ResourceClass::R2 => "r2_buckets",
        }
    }
}

impl std::fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One action a generated handler performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Action {
    /// Run a statement and return all rows.
    #[serde(rename = "d1.query")]
    D1Query(SqlParams),
    /// Run a statement and return the first row, or `null`.
    #[serde(rename = "d1.first")]
    D1First(SqlParams),
    /// Run a statement and return its metadata.
    #[serde(rename = "d1.run")]
    D1Run(SqlParams),
    #[serde(rename = "kv.get")]
    KvGet(KvGetParams),
    #[serde(rename = "kv.put")]
    KvPut(KvPutParams),
    #[serde(rename = "kv.delete")]
    KvDelete(KeyParams),
    #[serde(rename = "r2.get")]
    R2Get(KeyParams),
    #[serde(rename = "r2.put")]
    R2Put(R2PutParams),
    #[serde(rename = "r2.delete")]
    R2Delete(KeyParams),
    /// Outbound HTTP call.
    #[serde(rename = "fetch")]
    Fetch(FetchParams),
}

impl Action {
    /// The resource class this action needs a binding for, if any.
    pub fn resource_class(&self) -> Option<ResourceClass> {
        match self {
            Action::D1Query(_) | Action::D1First(_) | Action::D1Run(_) => Some(ResourceClass::D1),
            Action::KvGet(_) | Action::KvPut(_) | Action::KvDelete(_) => Some(ResourceClass::Kv),
            Action::R2Get(_) | Action::R2Put(_) | Action::R2Delete(_) => Some(ResourceClass::R2),
            Action::Fetch(_) => None,
        }
    }
}

/// Parameters of the `d1.*` actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlParams {
    pub sql: String,
    /// Positional bind values.
    #[serde(default)]
    pub params: Vec<Value>,
}

/// How `kv.get` decodes the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KvValueType {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvGetParams {
    pub key: String,
    #[serde(default, rename = "type")]
    pub value_type: KvValueType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvPutParams {
    pub key: String,
    pub value: Value,
    /// Expiration TTL in seconds.
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Parameters of actions that only address a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyParams {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct R2PutParams {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchParams {
    pub url: String,
    #[serde(default = "default_fetch_method")]
    pub method: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<Value>,
}

fn default_fetch_method() -> String {
    "GET".to_string()
}
