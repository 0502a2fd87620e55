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
pub struct ListCommand {
    /// Path to dialectic.toml (defaults to ./dialectic.toml)
    #[arg(short, long, default_value = "dialectic.toml")]
    pub config: PathBuf,

    /// Print the matrix as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let toml = DialecticToml::open(&self.config).unwrap_or_exit();
        let report = ops::list(&toml)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
