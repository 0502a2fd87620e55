//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the manifest tables, so nested checks can report where they failed.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "dialectic.toml");
/// ctx.validate_name("DIALECT", "placeholder")?;
///
/// let nested = ctx.push("dialects").push("sqlite");
/// nested.validate_name("then", "snippet key")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["dialects", "sqlite"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "snippet key in 'dialects.sqlite'" or just "placeholder".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a name or value in the source.
    pub fn find_span(&self, needle: &str) -> Option<SourceSpan> {
        find_span(self.source.src(), needle)
    }

    /// Build a validation error located at `needle`, if it can be found.
    pub fn error_at(&self, message: impl Into<String>, needle: &str) -> Box<crate::Error> {
        self.source
            .validation_error(message, self.find_span(needle))
    }

    /// Validate that a name is a valid TypeScript identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        match validate_identifier(name) {
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            )),
            None => Ok(()),
        }
    }
}

/// Find the span of a key or value in the TOML source.
///
/// Looks for the quoted value first, then a table header segment, then a bare
/// key followed by `=`.
pub(crate) fn find_span(src: &str, needle: &str) -> Option<SourceSpan> {
    if needle.is_empty() {
        return None;
    }

    for quote in ['"', '\''] {
        let pattern = format!("{quote}{needle}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, needle.len())));
        }
    }

    for pattern in [format!(".{}]", needle), format!(".{}.", needle)] {
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, needle.len())));
        }
    }

    for pattern in [format!("{} =", needle), format!("{}=", needle)] {
        if let Some(pos) = src.find(&pattern) {
            let at_boundary = src[..pos]
                .chars()
                .next_back()
                .is_none_or(|c| c.is_whitespace() || c == '{' || c == ',');
            if at_boundary {
                return Some(SourceSpan::from((pos, needle.len())));
            }
        }
    }

    None
}

/// Validate that a name is a valid TypeScript identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("name must start with a letter, '_' or '$'"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '$')) {
        return Some("name must contain only letters, numbers, '_' and '$'");
    }

    None
}

/// Validate a snippet key: `key` or `template.key`, where `key` matches `\w+`.
pub(crate) fn validate_snippet_key(key: &str) -> Option<&'static str> {
    let (template, key) = match key.split_once('.') {
        Some((template, key)) => (Some(template), key),
        None => (None, key),
    };

    if template.is_some_and(str::is_empty) {
        return Some("template name before '.' cannot be empty");
    }
    if key.is_empty() {
        return Some("snippet key cannot be empty");
    }
    if !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Some("snippet keys may only contain letters, numbers, and underscores");
    }
    None
}
