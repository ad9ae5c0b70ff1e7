//! Wrangler invocation - running and publishing a built worker.

use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use eyre::{Result, WrapErr, bail};
use skyway_manifest::CompiledConfig;

/// Where a command acts: the local dev environment or the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Local,
    Remote,
}

impl Location {
    fn flag(self) -> &'static str {
        match self {
            Location::Local => "--local",
            Location::Remote => "--remote",
        }
    }
}

/// Runs `wrangler` through `npx` with inherited stdio.
#[derive(Debug, Clone)]
pub struct Wrangler {
    program: OsString,
    prefix: Vec<OsString>,
    envs: BTreeMap<String, String>,
}

impl Wrangler {
    pub fn new() -> Self {
        Self {
            program: "npx".into(),
            prefix: vec!["wrangler".into()],
            envs: BTreeMap::new(),
        }
    }

    /// Run a different program in place of `npx wrangler`.
    #[cfg(test)]
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            prefix: Vec::new(),
            envs: BTreeMap::new(),
        }
    }

    /// Environment variables for the child process.
    pub fn envs(mut self, envs: &BTreeMap<String, String>) -> Self {
        self.envs = envs.clone();
        self
    }

    /// `wrangler dev <entry>`
    pub fn dev(&self, entry: &Path) -> Result<()> {
        self.run(dev_args(entry))
    }

    /// `wrangler deploy <entry>`
    pub fn deploy(&self, entry: &Path) -> Result<()> {
        self.run(deploy_args(entry))
    }

    /// `wrangler d1 execute <database> --local|--remote --file <script>`
    pub fn execute_sql(&self, database: &str, script: &Path, location: Location) -> Result<()> {
        self.run(execute_args(database, script, location))
    }

    fn command(&self, args: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix).args(args).envs(&self.envs);
        cmd
    }

    fn display(&self, args: &[OsString]) -> String {
        std::iter::once(&self.program)
            .chain(&self.prefix)
            .chain(args)
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn run(&self, args: Vec<OsString>) -> Result<()> {
        let line = self.display(&args);
        tracing::debug!(command = %line, "running wrangler");

        let status = self
            .command(&args)
            .status()
            .wrap_err_with(|| format!("Failed to run `{line}`"))?;
        if !status.success() {
            bail!("`{line}` exited with {status}");
        }
        Ok(())
    }
}

impl Default for Wrangler {
    fn default() -> Self {
        Self::new()
    }
}

fn dev_args(entry: &Path) -> Vec<OsString> {
    vec!["dev".into(), entry.into()]
}

fn deploy_args(entry: &Path) -> Vec<OsString> {
    vec!["deploy".into(), entry.into()]
}

fn execute_args(database: &str, script: &Path, location: Location) -> Vec<OsString> {
    vec![
        "d1".into(),
        "execute".into(),
        database.into(),
        location.flag().into(),
        "--file".into(),
        script.into(),
    ]
}

/// Options for running a built worker.
pub struct LaunchOptions<'a> {
    /// Output directory holding `index.js`.
    pub output_dir: &'a Path,
    /// Data-initialization script applied to the first D1 database.
    pub init: Option<&'a Path>,
    pub location: Location,
}

/// Apply the initialization script if one is given, then start
/// (`Local`) or publish (`Remote`) the worker.
pub fn launch(wrangler: &Wrangler, config: &CompiledConfig, opts: LaunchOptions) -> Result<()> {
    if let Some(script) = opts.init {
        let Some(database) = config.bindings.primary_database() else {
            bail!("--init needs a D1 database declared in wrangler.toml");
        };
        wrangler
            .execute_sql(database.target_name(), script, opts.location)
            .wrap_err_with(|| format!("Failed to apply {}", script.display()))?;
    }

    let entry: PathBuf = opts.output_dir.join("index.js");
    match opts.location {
        Location::Local => wrangler.dev(&entry),
        Location::Remote => wrangler.deploy(&entry),
    }
}
