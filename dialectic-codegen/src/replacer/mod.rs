//! Per-template replacers.
//!
//! Some templates need rewrites the generic passes cannot express, such as a
//! dialect-specific SQL function or result shape. Those rewrites are
//! registered here explicitly, keyed by template name, and run by the
//! `replace` pass before anything else touches the text.

mod builtin;
mod pattern;

pub use builtin::{CountDecoding, JsonAggregate};
use dialectic_manifest::{Dialect, Manifest};
use eyre::Result;
use indexmap::IndexMap;
pub use pattern::PatternReplacer;

use crate::pipeline::RenderContext;

/// A custom transformation for one template.
pub trait Replacer: Send + Sync {
    /// Name shown in diagnostics and by `dialectic list`.
    fn name(&self) -> &str;

    /// Whether this replacer runs for `dialect`.
    #[allow(unused_variables)]
    fn applies_to(&self, dialect: Dialect) -> bool {
        true
    }

    /// Rewrite `text` for the pair described by `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error when the template no longer has the shape the
    /// replacer expects. Only the current pair fails.
    fn apply(&self, text: &str, ctx: &RenderContext<'_>) -> Result<String>;
}

/// Template name → ordered replacers.
#[derive(Default)]
pub struct ReplacerRegistry {
    entries: IndexMap<String, Vec<Box<dyn Replacer>>>,
}

impl ReplacerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in replacers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("jsonAgg", JsonAggregate);
        registry.register("count", CountDecoding);
        registry.register("findManyAndCount", CountDecoding);
        registry
    }

    /// Built-ins followed by the manifest's `[[replacers]]`, in file order.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let mut registry = Self::with_builtins();
        for (index, config) in manifest.replacers.iter().enumerate() {
            registry.register(
                config.template.clone(),
                PatternReplacer::from_config(config, index)?,
            );
        }
        Ok(registry)
    }

    /// Append a replacer for `template`.
    pub fn register(&mut self, template: impl Into<String>, replacer: impl Replacer + 'static) {
        self.entries
            .entry(template.into())
            .or_default()
            .push(Box::new(replacer));
    }

    /// Replacers registered for `template`, in registration order.
    pub fn get(&self, template: &str) -> &[Box<dyn Replacer>] {
        self.entries
            .get(template)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Template names that have replacers.
    pub fn templates(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Names of the replacers registered for `template`.
    pub fn names(&self, template: &str) -> Vec<&str> {
        self.get(template).iter().map(|r| r.name()).collect()
    }

    /// Number of templates with at least one replacer.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no replacers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_builtins() {
        let registry = ReplacerRegistry::with_builtins();
        assert_eq!(registry.names("jsonAgg"), vec!["json-aggregate"]);
        assert_eq!(registry.names("count"), vec!["count-decoding"]);
        assert_eq!(registry.names("findManyAndCount"), vec!["count-decoding"]);
        assert!(registry.get("upsert").is_empty());
    }

    #[test]
    fn test_manifest_replacers_follow_builtins() {
        let manifest = Manifest::from_str(
            r#"
            [[replacers]]
            template = "count"
            pattern = "count\\(\\*\\)"
            replacement = "count(1)"

            [[replacers]]
            template = "cursor"
            dialects = ["mysql"]
            pattern = "nulls last"
            replacement = ""
            "#,
        )
        .unwrap();

        let registry = ReplacerRegistry::from_manifest(&manifest).unwrap();

        assert_eq!(registry.names("count"), vec!["count-decoding", "pattern#0"]);
        assert_eq!(registry.names("cursor"), vec!["pattern#1"]);
        assert!(!registry.get("cursor")[0].applies_to(Dialect::Sqlite));
        assert_eq!(
            registry.templates().collect::<Vec<_>>(),
            vec!["jsonAgg", "count", "findManyAndCount", "cursor"]
        );
    }
}
