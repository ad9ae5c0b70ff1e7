//! Loading the API description, bindings manifest and environment together.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{ApiDescription, BindingsManifest, EnvFile, Error, Result, merge_env};

/// Default bindings manifest file name.
pub const DEFAULT_BINDINGS_FILE: &str = "wrangler.toml";
/// Default environment override file name.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Everything the compiler needs from the inputs, merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledConfig {
    pub bindings: BindingsManifest,
    pub api: ApiDescription,
    pub env: BTreeMap<String, String>,
}

/// A non-fatal problem found while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// No bindings manifest; bindings are empty.
    BindingsManifestMissing { path: PathBuf },
    /// The override file was malformed and ignored as a whole.
    EnvOverrideParseFailure {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::BindingsManifestMissing { path } => write!(
                f,
                "{} not found; bindings will be unavailable",
                path.display()
            ),
            LoadWarning::EnvOverrideParseFailure { path, line, reason } => write!(
                f,
                "ignoring {}: line {line}: {reason}",
                path.display()
            ),
        }
    }
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub config: CompiledConfig,
    pub warnings: Vec<LoadWarning>,
    /// Resolved path of the API description.
    pub api_path: PathBuf,
}

/// Reads every compiler input relative to a root directory.
#[derive(Debug, Clone)]
pub struct Loader {
    root: PathBuf,
    bindings_file: PathBuf,
    env_file: PathBuf,
    ambient: BTreeMap<String, String>,
}

impl Loader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bindings_file: PathBuf::from(DEFAULT_BINDINGS_FILE),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            ambient: BTreeMap::new(),
        }
    }

    /// Use a different bindings manifest, relative to the root.
    pub fn bindings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.bindings_file = path.into();
        self
    }

    /// Use a different environment override file, relative to the root.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    /// Set the ambient environment the override file is merged over.
    pub fn ambient_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.ambient = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Resolve a path against the root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Load all inputs. The API description is checked first so a missing
    /// document fails before anything else is read.
    pub fn load(&self, api_path: impl AsRef<Path>) -> Result<Loaded> {
        let api_path = self.resolve(api_path);
        if !api_path.is_file() {
            return Err(Box::new(Error::ApiFileNotFound { path: api_path }));
        }

        let mut warnings = Vec::new();

        let bindings_path = self.resolve(&self.bindings_file);
        let bindings = if bindings_path.is_file() {
            tracing::debug!(path = %bindings_path.display(), "reading bindings manifest");
            BindingsManifest::from_file(&bindings_path)?
        } else {
            let warning = LoadWarning::BindingsManifestMissing {
                path: bindings_path,
            };
            tracing::warn!("{warning}");
            warnings.push(warning);
            BindingsManifest::default()
        };

        tracing::debug!(path = %api_path.display(), "reading API description");
        let api = ApiDescription::from_file(&api_path)?;

        let env_path = self.resolve(&self.env_file);
        let overrides = match EnvFile::read(&env_path) {
            Ok(Some(file)) => {
                tracing::debug!(
                    path = %env_path.display(),
                    vars = file.len(),
                    "applying env overrides"
                );
                file.into_map()
            }
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                let warning = LoadWarning::EnvOverrideParseFailure {
                    path: env_path,
                    line: e.line,
                    reason: e.reason,
                };
                tracing::warn!("{warning}");
                warnings.push(warning);
                BTreeMap::new()
            }
        };
        let env = merge_env(&self.ambient, &overrides);

        Ok(Loaded {
            config: CompiledConfig { bindings, api, env },
            warnings,
            api_path,
        })
    }
}
