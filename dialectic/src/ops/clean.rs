//! Clean operation - remove generated dialect directories.

use dialectic_codegen::Generator;
use dialectic_manifest::{Dialect, DialecticToml};
use eyre::{Context, Result};

use crate::reports::CleanReport;

/// Options for the clean operation.
pub struct CleanOptions<'a> {
    /// Dialects to clean; empty means all of them.
    pub dialects: &'a [Dialect],
    /// Whether to preview without deleting.
    pub dry_run: bool,
}

/// Execute the clean operation.
pub fn clean(toml: &DialecticToml, opts: CleanOptions) -> Result<CleanReport> {
    let generator = Generator::from_toml(toml)?;
    let dialects: Vec<Dialect> = Dialect::ALL
        .into_iter()
        .filter(|d| opts.dialects.is_empty() || opts.dialects.contains(d))
        .collect();

    let removed = generator
        .clean(&dialects, opts.dry_run)
        .wrap_err("Failed to clean output directories")?;

    Ok(CleanReport {
        dry_run: opts.dry_run,
        removed,
    })
}
