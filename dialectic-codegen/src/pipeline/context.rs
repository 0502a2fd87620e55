//! Render context passed through the passes of one (template, dialect) pair.

use dialectic_manifest::{Dialect, DialectProfile, Manifest};

use super::diagnostic::Diagnostic;
use crate::Template;

/// Context passed through all passes for one pair.
///
/// `text` starts as the template source and is rewritten in place by every
/// pass; the other fields are read-only configuration.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// The template being rendered.
    pub template: &'a Template,
    /// Profile of the dialect being generated.
    pub profile: &'a DialectProfile,
    /// Profile of the reference dialect the template is written in.
    pub reference: &'a DialectProfile,
    /// The manifest, for run-wide settings.
    pub manifest: &'a Manifest,
    /// The text as transformed so far.
    pub text: String,
    /// Diagnostics collected while rendering.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> RenderContext<'a> {
    /// Create a new context whose text is the template source.
    pub fn new(
        template: &'a Template,
        profile: &'a DialectProfile,
        reference: &'a DialectProfile,
        manifest: &'a Manifest,
    ) -> Self {
        Self {
            template,
            profile,
            reference,
            manifest,
            text: template.source.clone(),
            diagnostics: Vec::new(),
        }
    }

    /// The dialect being generated.
    pub fn dialect(&self) -> Dialect {
        self.profile.dialect
    }

    /// `template.dialect`, used as the location of pass diagnostics.
    pub fn location(&self) -> String {
        format!("{}.{}", self.template.name, self.dialect())
    }

    /// Add an info diagnostic located at this pair.
    pub fn add_info(&mut self, pass: &str, message: impl Into<String>) {
        let location = self.location();
        self.diagnostics.push(Diagnostic::info(pass, message).at(location));
    }
}
