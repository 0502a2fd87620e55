//! Snippet regions: `// @start key` … `// @end key`.
//!
//! A template is parsed once into literal text and named holes. Each hole is
//! then filled with the dialect's override for its key, or with its own inner
//! text when there is none.

use std::collections::HashMap;

use dialectic_core::{indentation, reindent, split_lines_inclusive};
use eyre::Result;

use crate::{
    TemplateError,
    pipeline::{Pass, RenderContext, Stage},
};

/// A parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text emitted as is.
    Literal(String),
    /// A snippet region.
    Hole(Hole),
}

/// A named snippet region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hole {
    pub key: String,
    /// Indentation of the `@start` line; overrides are re-indented to it.
    pub indent: String,
    /// Lines between the markers, verbatim.
    pub body: String,
    /// 1-based line of the `@start` marker.
    pub line: usize,
    /// Line terminator of the region, taken from its markers.
    pub newline: &'static str,
}

fn terminator(line: &str) -> Option<&'static str> {
    if line.ends_with("\r\n") {
        Some("\r\n")
    } else if line.ends_with('\n') {
        Some("\n")
    } else {
        None
    }
}

enum Marker<'a> {
    Start(&'a str),
    End(&'a str),
    Malformed,
}

/// Recognize a marker line. Returns `None` for ordinary lines.
fn parse_marker(line: &str) -> Option<Marker<'_>> {
    let comment = line.trim().strip_prefix("//")?.trim_start();

    let (is_start, rest) = if let Some(rest) = comment.strip_prefix("@start") {
        (true, rest)
    } else if let Some(rest) = comment.strip_prefix("@end") {
        (false, rest)
    } else {
        return None;
    };

    if !rest.starts_with(char::is_whitespace) {
        return Some(Marker::Malformed);
    }
    let key = rest.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Some(Marker::Malformed);
    }

    Some(if is_start {
        Marker::Start(key)
    } else {
        Marker::End(key)
    })
}

/// Whether `line` is a snippet marker (well-formed or not).
pub(crate) fn is_marker(line: &str) -> bool {
    parse_marker(line).is_some()
}

/// Parse `text` into literal segments and snippet holes.
///
/// # Errors
///
/// Unmatched, mismatched, nested, duplicate and malformed markers are
/// authoring errors.
pub fn parse_snippets(template: &str, text: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut open: Option<Hole> = None;
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (idx, line) in split_lines_inclusive(text).into_iter().enumerate() {
        let line_no = idx + 1;

        match parse_marker(line) {
            None => match open.as_mut() {
                Some(hole) => hole.body.push_str(line),
                None => literal.push_str(line),
            },
            Some(Marker::Malformed) => {
                return Err(TemplateError::MalformedMarker {
                    template: template.to_string(),
                    line: line_no,
                    text: line.trim().to_string(),
                });
            }
            Some(Marker::Start(key)) => {
                if let Some(outer) = &open {
                    return Err(TemplateError::NestedSnippet {
                        template: template.to_string(),
                        outer: outer.key.clone(),
                        inner: key.to_string(),
                        line: line_no,
                    });
                }
                if let Some(first) = seen.get(key) {
                    return Err(TemplateError::DuplicateSnippet {
                        template: template.to_string(),
                        key: key.to_string(),
                        line: line_no,
                        first: *first,
                    });
                }
                seen.insert(key.to_string(), line_no);

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                open = Some(Hole {
                    key: key.to_string(),
                    indent: indentation(line).to_string(),
                    body: String::new(),
                    line: line_no,
                    newline: terminator(line).unwrap_or("\n"),
                });
            }
            Some(Marker::End(key)) => match open.take() {
                None => {
                    return Err(TemplateError::UnmatchedEnd {
                        template: template.to_string(),
                        key: key.to_string(),
                        line: line_no,
                    });
                }
                Some(hole) if hole.key != key => {
                    return Err(TemplateError::MismatchedEnd {
                        template: template.to_string(),
                        open: hole.key,
                        found: key.to_string(),
                        line: line_no,
                    });
                }
                Some(mut hole) => {
                    if let Some(newline) = terminator(line) {
                        hole.newline = newline;
                    }
                    segments.push(Segment::Hole(hole));
                }
            },
        }
    }

    if let Some(hole) = open {
        return Err(TemplateError::UnmatchedStart {
            template: template.to_string(),
            key: hole.key,
            line: hole.line,
        });
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

/// Keys of every snippet region in `text`, in order of appearance.
pub fn snippet_keys(template: &str, text: &str) -> Result<Vec<String>, TemplateError> {
    Ok(parse_snippets(template, text)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Hole(hole) => Some(hole.key),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Fill every hole, using `lookup` for overrides.
pub fn fill_snippets<'a>(
    segments: &[Segment],
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Hole(hole) => match lookup(&hole.key) {
                Some(replacement) => {
                    let block = reindent(replacement, &hole.indent);
                    if !block.is_empty() {
                        out.push_str(&block.replace('\n', hole.newline));
                        out.push_str(hole.newline);
                    }
                }
                None => out.push_str(&hole.body),
            },
        }
    }
    out
}

/// Resolves snippet regions against the dialect's overrides.
pub struct SnippetPass;

impl Pass for SnippetPass {
    fn name(&self) -> &'static str {
        "snippets"
    }

    fn description(&self) -> &'static str {
        "Fill snippet regions with dialect overrides or their default text"
    }

    fn stage(&self) -> Stage {
        Stage::Snippets
    }

    fn run(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let template = ctx.template;
        let profile = ctx.profile;
        let segments = parse_snippets(&template.name, &ctx.text)?;
        ctx.text = fill_snippets(&segments, |key| profile.snippet(&template.name, key));
        Ok(())
    }
}
