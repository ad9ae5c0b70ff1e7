use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use skyway_codegen::WriteStrategy;

use super::{InputArgs, OutputArgs};
use crate::{
    ops::{
        self,
        build::BuildOptions,
        wrangler::{LaunchOptions, Location, Wrangler},
    },
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct LocalCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// SQL script to apply to the local D1 database before starting
    #[arg(long, value_name = "SQL")]
    pub init: Option<PathBuf>,
}

impl LocalCommand {
    pub fn run(&self) -> Result<()> {
        let compiled = ops::build(
            self.input.load()?,
            BuildOptions {
                output_dir: &self.output.out,
                dry_run: false,
                strategy: WriteStrategy::Staged,
            },
        )?;
        compiled.report.render(&mut TerminalOutput::new());

        ops::wrangler::launch(
            &Wrangler::new().envs(&compiled.config.env),
            &compiled.config,
            LaunchOptions {
                output_dir: &self.output.out,
                init: self.init.as_deref(),
                location: Location::Local,
            },
        )
    }
}
