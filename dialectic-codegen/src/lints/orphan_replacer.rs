//! Lint for replacers registered for templates that do not exist.

use super::{Lint, LintContext};
use crate::pipeline::Diagnostic;

/// Reports replacers whose template was not loaded.
///
/// Manifest replacers get a warning. Built-in replacers only get an info
/// diagnostic, since a project may simply not ship that template.
pub struct OrphanReplacerLint;

impl Lint for OrphanReplacerLint {
    fn name(&self) -> &'static str {
        "orphan-replacer"
    }

    fn description(&self) -> &'static str {
        "Check that every replacer targets an existing template"
    }

    fn check(&self, ctx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for template in ctx.replacers.templates() {
            if ctx.has_template(template) {
                continue;
            }

            let declared = ctx.manifest.replacers.iter().any(|r| r.template == template);
            let message = format!(
                "replacer(s) {} registered for missing template '{}'",
                ctx.replacers.names(template).join(", "),
                template
            );
            let diagnostic = if declared {
                Diagnostic::warning(self.name(), message)
            } else {
                Diagnostic::info(self.name(), message)
            };
            diagnostics.push(diagnostic.at(format!("replacers.{}", template)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use dialectic_manifest::Manifest;

    use super::*;
    use crate::{Template, pipeline::Severity, replacer::ReplacerRegistry};

    #[test]
    fn test_orphan_replacers() {
        let manifest = Manifest::from_str(
            r#"
            [[replacers]]
            template = "cursr"
            pattern = "a"
            replacement = "b"
            "#,
        )
        .unwrap();
        let registry = ReplacerRegistry::from_manifest(&manifest).unwrap();
        let templates = vec![
            Template::new("count.ts", ""),
            Template::new("findManyAndCount.ts", ""),
        ];
        let ctx = LintContext {
            manifest: &manifest,
            templates: &templates,
            replacers: &registry,
        };

        let mut diagnostics = Vec::new();
        OrphanReplacerLint.check(&ctx, &mut diagnostics);

        let found: Vec<_> = diagnostics
            .iter()
            .map(|d| (d.severity, d.location.as_deref().unwrap_or_default()))
            .collect();
        assert_eq!(
            found,
            vec![
                (Severity::Info, "replacers.jsonAgg"),
                (Severity::Warning, "replacers.cursr"),
            ]
        );
    }
}
