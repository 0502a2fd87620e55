use std::path::PathBuf;

use clap::Args;
use dialectic_manifest::DialecticToml;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to dialectic.toml (defaults to ./dialectic.toml)
    #[arg(short, long, default_value = "dialectic.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self, verbose: bool) -> Result<()> {
        let toml = DialecticToml::open(&self.config).unwrap_or_exit();

        let report = ops::check(
            &toml,
            ops::check::CheckOptions {
                include_info: verbose,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
