use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, optionally pointing at a span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern_error(
        &self,
        template: impl Into<String>,
        source: regex::Error,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidPattern {
            src: self.named_source(),
            span,
            template: template.into(),
            source,
        })
    }

    /// Create an error for an override that has no effect on the reference dialect.
    pub fn reference_override_error(
        &self,
        dialect: impl Into<String>,
        field: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ReferenceOverride {
            src: self.named_source(),
            span,
            dialect: dialect.into(),
            field: field.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a dialectic.toml next to your templates, or pass --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dialectic.toml")]
    #[diagnostic(code(dialectic::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(dialectic::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} '{name}'")]
    #[diagnostic(
        code(dialectic::invalid_identifier),
        help("{reason}. Use only letters, numbers, and underscores, starting with a letter, '_' or '$'.")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("invalid replacer pattern for template '{template}'")]
    #[diagnostic(
        code(dialectic::invalid_pattern),
        help("patterns use the regex crate syntax; look-around and backreferences are not supported")
    )]
    InvalidPattern {
        #[source_code]
        src: NamedSource<String>,
        #[label("does not compile")]
        span: Option<SourceSpan>,
        template: String,
        #[source]
        source: regex::Error,
    },

    #[error("'{field}' has no effect on the reference dialect '{dialect}'")]
    #[diagnostic(
        code(dialectic::reference_override),
        help("the reference dialect is emitted verbatim; move this setting to a variant dialect")
    )]
    ReferenceOverride {
        #[source_code]
        src: NamedSource<String>,
        #[label("ignored for the reference dialect")]
        span: Option<SourceSpan>,
        dialect: String,
        field: String,
    },
}
