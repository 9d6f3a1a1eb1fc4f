use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions, Inputs},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to kdsl.toml (defaults to ./kdsl.toml)
    #[arg(short, long, default_value = "kdsl.toml")]
    pub config: PathBuf,

    /// Output root (overrides `target.output` from kdsl.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot of every pipeline phase to this directory
    #[arg(long, value_name = "DIR")]
    pub snapshots: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let inputs = Inputs::load(&self.config).unwrap_or_exit();
        let output_dir = self
            .output
            .clone()
            .unwrap_or_else(|| inputs.toml.output_dir());

        let report = ops::generate(
            &inputs,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
                snapshot_dir: self.snapshots.as_deref(),
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
