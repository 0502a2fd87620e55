use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Template authoring errors.
///
/// Raised while rendering one (template, dialect) pair. They abort only that
/// pair; the orchestrator collects them and reports them together.
#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("{template}:{line}: snippet '{key}' is opened but never closed")]
    #[diagnostic(
        code(dialectic::snippet::unmatched_start),
        help("add a matching `// @end {key}` line")
    )]
    UnmatchedStart {
        template: String,
        key: String,
        line: usize,
    },

    #[error("{template}:{line}: `@end {key}` has no matching `@start`")]
    #[diagnostic(code(dialectic::snippet::unmatched_end))]
    UnmatchedEnd {
        template: String,
        key: String,
        line: usize,
    },

    #[error("{template}:{line}: `@end {found}` closes snippet '{open}'")]
    #[diagnostic(
        code(dialectic::snippet::mismatched_end),
        help("snippet regions cannot overlap; close '{open}' first")
    )]
    MismatchedEnd {
        template: String,
        open: String,
        found: String,
        line: usize,
    },

    #[error("{template}:{line}: snippet '{inner}' is nested inside '{outer}'")]
    #[diagnostic(
        code(dialectic::snippet::nested),
        help("snippet regions cannot be nested")
    )]
    NestedSnippet {
        template: String,
        outer: String,
        inner: String,
        line: usize,
    },

    #[error("{template}:{line}: snippet '{key}' is already defined on line {first}")]
    #[diagnostic(
        code(dialectic::snippet::duplicate),
        help("each snippet key may appear once per template")
    )]
    DuplicateSnippet {
        template: String,
        key: String,
        line: usize,
        first: usize,
    },

    #[error("{template}:{line}: malformed snippet marker `{text}`")]
    #[diagnostic(
        code(dialectic::snippet::malformed),
        help("markers look like `// @start key` and `// @end key`, with key matching \\w+")
    )]
    MalformedMarker {
        template: String,
        line: usize,
        text: String,
    },

    #[error("{template}:{line}: `{tag}-remove-next-line` is the last line of the template")]
    #[diagnostic(code(dialectic::directive::dangling_remove))]
    DanglingRemove {
        template: String,
        tag: String,
        line: usize,
    },

    #[error("{template}:{line}: directive has no dialect tag")]
    #[diagnostic(
        code(dialectic::directive::empty_tag),
        help("write the dialect in front, e.g. `// sqlite-insert: ...`")
    )]
    EmptyDirectiveTag { template: String, line: usize },

    #[error("{template}:{line}: unknown dialect '{tag}' in directive")]
    #[diagnostic(
        code(dialectic::directive::unknown_tag),
        help("directive tags are 'pg', 'mysql' or 'sqlite'")
    )]
    UnknownDirectiveTag {
        template: String,
        tag: String,
        line: usize,
    },

    #[error("{template}: replacer '{replacer}' failed: {message}")]
    #[diagnostic(code(dialectic::replacer))]
    Replacer {
        template: String,
        replacer: String,
        message: String,
    },

    #[error("{template}:{line}: unresolved `{marker}` left in {dialect} output")]
    #[diagnostic(
        code(dialectic::residue),
        help("a replacer or snippet override introduced directive syntax after directives were resolved")
    )]
    Residue {
        template: String,
        dialect: String,
        marker: String,
        line: usize,
    },
}

/// Orchestration errors.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("refusing to write '{template}' for {dialect}: the template is gated for this dialect")]
    #[diagnostic(code(dialectic::gated_write))]
    GatedWrite { template: String, dialect: String },

    #[error("generation failed for {} pair(s)", .failures.len())]
    #[diagnostic(code(dialectic::generation_failed))]
    GenerationFailed { failures: Vec<Failure> },
}

/// A (template, dialect) pair that could not be rendered.
///
/// `message` already names the template and, where known, the line.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub template: String,
    pub dialect: String,
    pub message: String,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.dialect, self.message)
    }
}
