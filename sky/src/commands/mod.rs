mod build;
mod check;
mod completions;
mod deploy;
mod local;

use std::path::{Path, PathBuf};

use build::BuildCommand;
use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use deploy::DeployCommand;
use eyre::Result;
use local::LocalCommand;
use skyway_manifest::Loaded;

use crate::ops;

/// API description used when `--file` is not given.
const DEFAULT_API_FILE: &str = "api.yaml";
/// Fallback when the default API description does not exist.
const FALLBACK_API_FILE: &str = "openapi.yaml";

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for skyway_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "skyway")]
#[command(version)]
#[command(about = "Compile OpenAPI documents with x-operations into Cloudflare Workers")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Local(cmd) => cmd.run(),
            Commands::Deploy(cmd) => cmd.run(),
            Commands::Build(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the worker and run it with `wrangler dev`
    Local(LocalCommand),

    /// Build the worker and publish it with `wrangler deploy`
    Deploy(DeployCommand),

    /// Build the worker without running it
    Build(BuildCommand),

    /// Validate the API description and bindings without writing anything
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Where to read the API description from.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Path to the API description (defaults to ./api.yaml, then ./openapi.yaml)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    /// The API description to load, relative to `root`.
    pub fn api_file(&self, root: &Path) -> PathBuf {
        match &self.file {
            Some(file) => file.clone(),
            None => default_api_file(root),
        }
    }

    /// Load every input from the current directory, exiting on errors.
    pub fn load(&self) -> Result<Loaded> {
        let root = std::env::current_dir()?;
        let api_file = self.api_file(&root);
        Ok(ops::load(&root, &api_file).unwrap_or_exit())
    }
}

/// Where to write the worker.
#[derive(Args)]
pub(crate) struct OutputArgs {
    /// Output directory (defaults to ./build)
    #[arg(short, long, default_value = "build")]
    pub out: PathBuf,
}

fn default_api_file(root: &Path) -> PathBuf {
    let default = PathBuf::from(DEFAULT_API_FILE);
    let fallback = PathBuf::from(FALLBACK_API_FILE);
    if !root.join(&default).is_file() && root.join(&fallback).is_file() {
        fallback
    } else {
        default
    }
}
