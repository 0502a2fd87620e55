//! Lints over the manifest, the templates and the replacer registry.
//!
//! Lints never fail a run on their own; they surface configuration that has
//! no effect, such as a gate entry for a template that does not exist.

mod orphan_replacer;
mod unknown_gate;
mod unused_snippet;

use dialectic_manifest::Manifest;
pub use orphan_replacer::OrphanReplacerLint;
use serde::Serialize;
pub use unknown_gate::UnknownGateLint;
pub use unused_snippet::UnusedSnippetLint;

use crate::{Template, pipeline::Diagnostic, replacer::ReplacerRegistry};

/// Everything a lint may inspect.
pub struct LintContext<'a> {
    pub manifest: &'a Manifest,
    pub templates: &'a [Template],
    pub replacers: &'a ReplacerRegistry,
}

impl LintContext<'_> {
    /// Whether a template named `name` was loaded.
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.iter().any(|t| t.name == name)
    }
}

/// A check that reports configuration problems as diagnostics.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// A short description of what this lint checks.
    fn description(&self) -> &'static str;

    /// Inspect the context and add any diagnostics.
    fn check(&self, ctx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>);

    /// Get information about this lint.
    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}

/// Information about a lint, as shown by `dialectic list`.
#[derive(Debug, Clone, Serialize)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Runs a set of lints.
pub struct Linter {
    lints: Vec<Box<dyn Lint>>,
}

impl Linter {
    /// Create a linter with the built-in lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(UnknownGateLint),
                Box::new(UnusedSnippetLint),
                Box::new(OrphanReplacerLint),
            ],
        }
    }

    /// Create a linter with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Information about every lint that will run.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }

    /// Run every lint and collect their diagnostics.
    pub fn run(&self, ctx: &LintContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for lint in &self.lints {
            lint.check(ctx, &mut diagnostics);
        }
        diagnostics
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lints() {
        let names: Vec<_> = Linter::new().lint_info().iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            vec!["unknown-gate", "unused-snippet", "orphan-replacer"]
        );
    }

    #[test]
    fn test_custom_lint() {
        struct AlwaysWarn;
        impl Lint for AlwaysWarn {
            fn name(&self) -> &'static str {
                "always-warn"
            }
            fn description(&self) -> &'static str {
                "Always produces a warning"
            }
            fn check(&self, _ctx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::warning(self.name(), "forced warning"));
            }
        }

        let manifest = Manifest::default();
        let registry = ReplacerRegistry::new();
        let ctx = LintContext {
            manifest: &manifest,
            templates: &[],
            replacers: &registry,
        };

        let diagnostics = Linter::empty().with_lint(AlwaysWarn).run(&ctx);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
    }
}
