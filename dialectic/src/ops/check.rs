//! Check operation - render every pair in memory and lint the manifest.

use dialectic_codegen::{Generator, pipeline::Severity};
use dialectic_manifest::{Dialect, DialecticToml};
use eyre::Result;

use super::describe;
use crate::reports::CheckReport;

/// Options for the check operation.
pub struct CheckOptions {
    /// Keep info diagnostics in the report.
    pub include_info: bool,
}

/// Execute the check operation.
///
/// Nothing is written; every template is rendered for every dialect and
/// the lints run against the loaded templates.
pub fn check(toml: &DialecticToml, opts: CheckOptions) -> Result<CheckReport> {
    let generator = Generator::from_toml(toml)?;
    let templates = generator.load_templates()?;
    let rendered = generator.render(&templates, &Dialect::ALL);

    let errors: Vec<String> = rendered.failures.iter().map(ToString::to_string).collect();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    let lints = generator.lint(&templates);
    for diag in rendered.diagnostics.iter().chain(&lints) {
        let msg = describe(diag);
        match diag.severity {
            Severity::Warning => warnings.push(msg),
            Severity::Info if opts.include_info => infos.push(msg),
            Severity::Info => {}
        }
    }

    Ok(CheckReport {
        config_path: toml.path().to_path_buf(),
        templates: templates.len(),
        modules: rendered.modules.len(),
        gated: rendered.gated.len(),
        errors,
        warnings,
        infos,
    })
}
