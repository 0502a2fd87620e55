use std::path::PathBuf;

use clap::Args;
use dialectic_manifest::{Dialect, DialecticToml};
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    /// Path to dialectic.toml (defaults to ./dialectic.toml)
    #[arg(short, long, default_value = "dialectic.toml")]
    pub config: PathBuf,

    /// Only clean these dialects (repeatable)
    #[arg(short, long = "dialect", value_name = "DIALECT")]
    pub dialects: Vec<Dialect>,

    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let toml = DialecticToml::open(&self.config).unwrap_or_exit();

        let report = ops::clean(
            &toml,
            ops::clean::CleanOptions {
                dialects: &self.dialects,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
