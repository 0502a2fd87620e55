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
pub struct GenerateCommand {
    /// Path to dialectic.toml (defaults to ./dialectic.toml)
    #[arg(short, long, default_value = "dialectic.toml")]
    pub config: PathBuf,

    /// Keep existing dialect directories instead of clearing them
    #[arg(long)]
    pub no_remove: bool,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Only generate these dialects (repeatable)
    #[arg(short, long = "dialect", value_name = "DIALECT")]
    pub dialects: Vec<Dialect>,

    /// Write the text after every pass as JSON under this directory
    #[arg(long, value_name = "DIR")]
    pub snapshot_dir: Option<PathBuf>,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let toml = DialecticToml::open(&self.config).unwrap_or_exit();

        let report = ops::generate(
            &toml,
            ops::generate::GenerateRunOptions {
                dialects: &self.dialects,
                keep_existing: self.no_remove,
                dry_run: self.dry_run,
                snapshot_dir: self.snapshot_dir.as_deref(),
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
