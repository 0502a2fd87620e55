//! Lint for snippet overrides that fill no region.

use super::{Lint, LintContext};
use crate::{passes::snippet_keys, pipeline::Diagnostic};

/// Warns about snippet overrides whose key matches no `@start` region.
///
/// `template.key` overrides must match a region of that template; bare `key`
/// overrides must match a region in at least one template the dialect
/// generates.
pub struct UnusedSnippetLint;

impl Lint for UnusedSnippetLint {
    fn name(&self) -> &'static str {
        "unused-snippet"
    }

    fn description(&self) -> &'static str {
        "Check that every snippet override fills a region"
    }

    fn check(&self, ctx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        // Templates with broken markers are reported when rendering.
        let regions: Vec<(&str, Vec<String>)> = ctx
            .templates
            .iter()
            .filter_map(|t| {
                snippet_keys(&t.name, &t.source)
                    .ok()
                    .map(|keys| (t.name.as_str(), keys))
            })
            .collect();

        for profile in ctx.manifest.profiles() {
            for key in profile.snippets.keys() {
                let used = match key.split_once('.') {
                    Some((template, region)) => regions
                        .iter()
                        .any(|(name, keys)| *name == template && keys.iter().any(|k| k == region)),
                    None => regions.iter().any(|(name, keys)| {
                        !profile.is_unsupported(name) && keys.iter().any(|k| k == key)
                    }),
                };
                if used {
                    continue;
                }
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        format!("snippet override '{}' matches no region", key),
                    )
                    .at(format!("dialects.{}.snippets", profile.dialect)),
                );
            }
        }
    }
}
