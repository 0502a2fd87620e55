use dialectic_manifest::{Dialect, ReplacerConfig};
use eyre::{Result, bail};
use regex::Regex;

use super::Replacer;
use crate::pipeline::RenderContext;

/// A `[[replacers]]` entry: regex search and replace.
pub struct PatternReplacer {
    name: String,
    dialects: Option<Vec<Dialect>>,
    regex: Regex,
    replacement: String,
    required: bool,
}

impl PatternReplacer {
    /// Create a replacer that applies to every variant dialect.
    pub fn new(name: impl Into<String>, pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            dialects: None,
            regex: Regex::new(pattern)?,
            replacement: replacement.into(),
            required: false,
        })
    }

    /// Build the replacer for the `index`th `[[replacers]]` entry.
    pub fn from_config(config: &ReplacerConfig, index: usize) -> Result<Self> {
        Ok(Self {
            dialects: config.dialects.clone(),
            required: config.required,
            ..Self::new(
                format!("pattern#{}", index),
                &config.pattern,
                config.replacement.clone(),
            )?
        })
    }

    /// Fail the pair when the pattern matches nothing.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Replacer for PatternReplacer {
    fn name(&self) -> &str {
        &self.name
    }

    fn applies_to(&self, dialect: Dialect) -> bool {
        self.dialects
            .as_ref()
            .is_none_or(|dialects| dialects.contains(&dialect))
    }

    fn apply(&self, text: &str, _ctx: &RenderContext<'_>) -> Result<String> {
        if self.required && !self.regex.is_match(text) {
            bail!("pattern `{}` matched nothing", self.regex.as_str());
        }
        Ok(self
            .regex
            .replace_all(text, self.replacement.as_str())
            .into_owned())
    }
}

#[cfg(test)]
mod tests {
    use dialectic_manifest::Manifest;

    use super::*;
    use crate::Template;

    fn apply(replacer: &PatternReplacer, text: &str) -> Result<String> {
        let manifest = Manifest::default();
        let template = Template::new("cursor.ts", text);
        let profile = manifest.profile(Dialect::Mysql);
        let reference = manifest.profile(Dialect::Pg);
        let ctx = RenderContext::new(&template, &profile, &reference, &manifest);
        replacer.apply(text, &ctx)
    }

    #[test]
    fn test_replaces_with_captures() {
        let replacer = PatternReplacer::new("p", r"(\w+) nulls last", "$1").unwrap();
        assert_eq!(
            apply(&replacer, "order by id nulls last").unwrap(),
            "order by id"
        );
    }

    #[test]
    fn test_optional_pattern_may_match_nothing() {
        let replacer = PatternReplacer::new("p", "ilike", "like").unwrap();
        assert_eq!(apply(&replacer, "where a = b").unwrap(), "where a = b");
    }

    #[test]
    fn test_required_pattern_fails_without_match() {
        let replacer = PatternReplacer::new("p", "ilike", "like").unwrap().required();
        let err = apply(&replacer, "where a = b").unwrap_err();
        assert!(err.to_string().contains("matched nothing"));
    }
}
