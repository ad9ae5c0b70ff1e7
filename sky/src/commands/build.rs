use clap::Args;
use eyre::Result;
use skyway_codegen::WriteStrategy;

use super::{InputArgs, OutputArgs};
use crate::{
    ops::{self, build::BuildOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Clear and rewrite the output directory directly instead of swapping in a staged build
    #[arg(long)]
    pub in_place: bool,
}

impl BuildCommand {
    pub fn run(&self) -> Result<()> {
        let loaded = self.input.load()?;

        let compiled = ops::build(
            loaded,
            BuildOptions {
                output_dir: &self.output.out,
                dry_run: self.dry_run,
                strategy: if self.in_place {
                    WriteStrategy::InPlace
                } else {
                    WriteStrategy::Staged
                },
            },
        )?;

        compiled.report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
