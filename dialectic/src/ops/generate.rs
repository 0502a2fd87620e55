//! Generate operation - render every dialect and write the output tree.

use std::path::Path;

use dialectic_codegen::{
    Error, GenerateOptions, Generator, SnapshotPlugin, generation::FileCategory,
};
use dialectic_manifest::{Dialect, DialecticToml};
use eyre::Result;

use super::describe;
use crate::reports::{
    DialectSummary, GenerateReport, GenerationResult, PreviewResult, WrittenResult,
};

/// Options for the generate operation.
pub struct GenerateRunOptions<'a> {
    /// Dialects to generate; empty means all of them.
    pub dialects: &'a [Dialect],
    /// Keep existing dialect directories.
    pub keep_existing: bool,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Where to write per-pass snapshots, if anywhere.
    pub snapshot_dir: Option<&'a Path>,
}

/// Execute the generate operation.
///
/// A run with failing pairs is not an error here: the failures are carried
/// by the report so they can all be shown.
pub fn generate(toml: &DialecticToml, opts: GenerateRunOptions) -> Result<GenerateReport> {
    let mut generator = Generator::from_toml(toml)?;
    if let Some(dir) = opts.snapshot_dir {
        generator = generator.with_plugin(SnapshotPlugin::with_output_dir(dir));
    }

    let options = GenerateOptions {
        dialects: opts.dialects.to_vec(),
        keep_existing: opts.keep_existing,
        dry_run: opts.dry_run,
    };
    let output_dir = generator.output_dir();

    let outcome = match generator.generate(&options) {
        Ok(outcome) => outcome,
        Err(e) => {
            return match e.downcast::<Error>() {
                Ok(Error::GenerationFailed { failures }) => Ok(GenerateReport {
                    output_dir,
                    warnings: Vec::new(),
                    snapshot_dir: opts.snapshot_dir.map(Path::to_path_buf),
                    result: GenerationResult::Failed(failures),
                }),
                Ok(other) => Err(other.into()),
                Err(e) => Err(e),
            };
        }
    };

    let warnings = outcome
        .diagnostics
        .iter()
        .filter(|d| d.severity.is_warning())
        .map(describe)
        .collect();

    let result = if outcome.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: outcome.files,
            cleared: outcome.cleared,
        })
    } else {
        let dialects = options
            .selected()
            .into_iter()
            .map(|dialect| {
                let in_dialect = |category: FileCategory| {
                    outcome
                        .files
                        .iter()
                        .filter(|f| f.category == category)
                        .filter(|f| f.path.starts_with(dialect.as_str()))
                        .count()
                };
                DialectSummary {
                    dialect,
                    modules: in_dialect(FileCategory::Generated),
                    extras: in_dialect(FileCategory::Extra),
                    gated: outcome
                        .gated
                        .iter()
                        .filter(|(_, d)| *d == dialect)
                        .map(|(t, _)| t.clone())
                        .collect(),
                }
            })
            .collect();

        GenerationResult::Written(WrittenResult {
            dialects,
            written: outcome.stats.written,
            skipped: outcome.stats.skipped,
            cleared: outcome.cleared,
        })
    };

    Ok(GenerateReport {
        output_dir,
        warnings,
        snapshot_dir: opts.snapshot_dir.map(Path::to_path_buf),
        result,
    })
}
