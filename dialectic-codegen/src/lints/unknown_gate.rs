//! Lint for gate entries naming templates that do not exist.

use super::{Lint, LintContext};
use crate::pipeline::Diagnostic;

/// Warns about `unsupported` entries that match no loaded template.
///
/// A misspelled entry silently lets the template through, so the dialect
/// would offer a feature it cannot support.
pub struct UnknownGateLint;

impl Lint for UnknownGateLint {
    fn name(&self) -> &'static str {
        "unknown-gate"
    }

    fn description(&self) -> &'static str {
        "Check that every unsupported template exists"
    }

    fn check(&self, ctx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for profile in ctx.manifest.profiles() {
            for name in &profile.unsupported {
                if ctx.has_template(name) {
                    continue;
                }
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        format!("'{}' is gated but no such template exists", name),
                    )
                    .at(format!("dialects.{}.unsupported", profile.dialect)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use dialectic_manifest::Manifest;

    use super::*;
    use crate::{Template, replacer::ReplacerRegistry};

    #[test]
    fn test_unknown_gate_entries() {
        let manifest = Manifest::default();
        let templates = vec![Template::new("upsert.ts", ""), Template::new("count.ts", "")];
        let registry = ReplacerRegistry::new();
        let ctx = LintContext {
            manifest: &manifest,
            templates: &templates,
            replacers: &registry,
        };

        let mut diagnostics = Vec::new();
        UnknownGateLint.check(&ctx, &mut diagnostics);

        // mysql gates `upsert` and `$withMaterialized` by default
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("$withMaterialized"));
        assert_eq!(
            diagnostics[0].location.as_deref(),
            Some("dialects.mysql.unsupported")
        );
    }
}
