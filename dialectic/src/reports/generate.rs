//! Generate command report data structures.

use std::path::PathBuf;

use dialectic_codegen::{Failure, generation::PreviewEntry};
use dialectic_manifest::Dialect;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Resolved output root.
    pub output_dir: PathBuf,
    /// Warning messages from the passes.
    pub warnings: Vec<String>,
    /// Where pass snapshots were written, if requested.
    pub snapshot_dir: Option<PathBuf>,
    pub result: GenerationResult,
}

/// Result of a generation run.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
    /// Some pairs failed; nothing was written.
    Failed(Vec<Failure>),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub dialects: Vec<DialectSummary>,
    /// Number of files written.
    pub written: usize,
    /// Files left alone because they already existed.
    pub skipped: Vec<PathBuf>,
    /// Dialect directories cleared before writing.
    pub cleared: Vec<PathBuf>,
}

/// What one dialect directory received.
#[derive(Debug)]
pub struct DialectSummary {
    pub dialect: Dialect,
    pub modules: usize,
    pub extras: usize,
    /// Templates skipped by the feature gate.
    pub gated: Vec<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewEntry>,
    /// Directories that would be cleared first.
    pub cleared: Vec<PathBuf>,
}

impl GenerateReport {
    /// Whether every pair rendered.
    pub fn is_success(&self) -> bool {
        !matches!(self.result, GenerationResult::Failed(_))
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(dir) = &self.snapshot_dir {
            out.key_value("Pass snapshots written to", &dir.display().to_string());
            out.newline();
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => render_preview(out, preview),
            GenerationResult::Failed(failures) => render_failures(out, failures),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.section("Dialects");
        for summary in &written.dialects {
            let mut line = format!("{} modules", summary.modules);
            if summary.extras > 0 {
                line.push_str(&format!(", {} extras", summary.extras));
            }
            if !summary.gated.is_empty() {
                line.push_str(&format!(", gated: {}", summary.gated.join(", ")));
            }
            out.key_value_indented(summary.dialect.as_str(), &line);
        }
        out.newline();

        if !written.cleared.is_empty() {
            out.section("Cleared");
            for dir in &written.cleared {
                out.removed_item(&dir.display().to_string());
            }
            out.newline();
        }

        out.key_value(
            "Generated",
            &format!("{} ({} files)", self.output_dir.display(), written.written),
        );

        if !written.skipped.is_empty() {
            out.newline();
            out.section("Kept existing");
            for path in &written.skipped {
                out.list_item(&path.display().to_string());
            }
        }
    }
}

fn render_preview(out: &mut dyn Output, preview: &PreviewResult) {
    for file in &preview.files {
        out.divider(&file.path.display().to_string());
        out.preformatted(&file.content);
    }

    out.divider("Summary");
    out.preformatted(&format!("{} files would be generated", preview.files.len()));
    if !preview.cleared.is_empty() {
        out.section("Would clear");
        for dir in &preview.cleared {
            out.removed_item(&dir.display().to_string());
        }
    }
}

fn render_failures(out: &mut dyn Output, failures: &[Failure]) {
    for failure in failures {
        out.error(&failure.to_string());
    }
    out.newline();
    out.preformatted(&format!(
        "generation failed for {} pair(s); nothing was written",
        failures.len()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::tests::RecordingOutput;

    fn report(result: GenerationResult) -> GenerateReport {
        GenerateReport {
            output_dir: PathBuf::from("src"),
            warnings: vec!["unused snippet".to_string()],
            snapshot_dir: None,
            result,
        }
    }

    #[test]
    fn test_written_summary() {
        let report = report(GenerationResult::Written(WrittenResult {
            dialects: vec![
                DialectSummary {
                    dialect: Dialect::Mysql,
                    modules: 2,
                    extras: 0,
                    gated: vec!["upsert".to_string()],
                },
                DialectSummary {
                    dialect: Dialect::Sqlite,
                    modules: 3,
                    extras: 1,
                    gated: vec![],
                },
            ],
            written: 9,
            skipped: vec![],
            cleared: vec![PathBuf::from("src/mysql")],
        }));

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        let text = out.text();

        assert!(report.is_success());
        assert!(text.contains("warning: unused snippet"));
        assert!(text.contains("  mysql: 2 modules, gated: upsert"));
        assert!(text.contains("  sqlite: 3 modules, 1 extras"));
        assert!(text.contains("  - src/mysql"));
        assert!(text.contains("Generated: src (9 files)"));
    }

    #[test]
    fn test_failures_are_all_listed() {
        let report = report(GenerationResult::Failed(vec![
            Failure {
                template: "a".to_string(),
                dialect: "mysql".to_string(),
                message: "a: boom".to_string(),
            },
            Failure {
                template: "b".to_string(),
                dialect: "sqlite".to_string(),
                message: "b: bang".to_string(),
            },
        ]));

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(!report.is_success());
        assert!(out.lines.contains(&"error: [mysql] a: boom".to_string()));
        assert!(out.lines.contains(&"error: [sqlite] b: bang".to_string()));
        assert!(out.text().contains("2 pair(s)"));
    }
}
