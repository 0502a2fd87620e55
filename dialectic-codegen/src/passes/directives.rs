//! Conditional directives.
//!
//! - `// <dialect>-insert: <code>` emits `<code>` for that dialect only.
//! - `// <dialect>-remove-next-line` drops the following line for that dialect.
//! - The dialect placeholder next to `===`/`!==` becomes the quoted dialect name.
//! - Comparisons between two string literals fold to `true`/`false`.

use dialectic_core::{indentation, split_lines_inclusive};
use dialectic_manifest::Dialect;
use eyre::Result;
use regex::Regex;

use crate::{
    TemplateError,
    pipeline::{Pass, RenderContext, Stage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DirectiveKind<'a> {
    Insert(&'a str),
    RemoveNextLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Directive<'a> {
    pub tag: &'a str,
    pub kind: DirectiveKind<'a>,
}

fn is_tag(tag: &str) -> bool {
    tag.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Recognize a directive comment. The tag may be empty or unknown; callers
/// decide whether that is an error.
pub(crate) fn parse_directive(line: &str) -> Option<Directive<'_>> {
    let comment = line.trim().strip_prefix("//")?.trim_start();

    if let Some((tag, code)) = comment.split_once("-insert:")
        && is_tag(tag)
    {
        return Some(Directive {
            tag,
            kind: DirectiveKind::Insert(code.trim()),
        });
    }

    let tag = comment.strip_suffix("-remove-next-line")?;
    is_tag(tag).then_some(Directive {
        tag,
        kind: DirectiveKind::RemoveNextLine,
    })
}

/// Resolve line directives for `dialect`.
pub fn resolve_lines(
    template: &str,
    text: &str,
    dialect: Dialect,
) -> Result<String, TemplateError> {
    let lines = split_lines_inclusive(text);
    let mut out = String::with_capacity(text.len());
    let mut skip_next = false;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        if skip_next {
            skip_next = false;
            continue;
        }

        let Some(directive) = parse_directive(line) else {
            out.push_str(line);
            continue;
        };

        let target = match directive.tag {
            "" => {
                return Err(TemplateError::EmptyDirectiveTag {
                    template: template.to_string(),
                    line: line_no,
                });
            }
            tag => Dialect::from_tag(tag).ok_or_else(|| TemplateError::UnknownDirectiveTag {
                template: template.to_string(),
                tag: tag.to_string(),
                line: line_no,
            })?,
        };

        match directive.kind {
            DirectiveKind::Insert(code) => {
                if target == dialect {
                    let ending = &line[line.trim_end_matches(['\r', '\n']).len()..];
                    out.push_str(indentation(line));
                    out.push_str(code);
                    out.push_str(ending);
                }
            }
            DirectiveKind::RemoveNextLine => {
                if idx + 1 == lines.len() {
                    return Err(TemplateError::DanglingRemove {
                        template: template.to_string(),
                        tag: directive.tag.to_string(),
                        line: line_no,
                    });
                }
                skip_next = target == dialect;
            }
        }
    }

    Ok(out)
}

/// Replace `placeholder` next to `===`/`!==` with the quoted dialect name.
pub fn substitute_placeholder(text: &str, placeholder: &str, dialect: Dialect) -> Result<String> {
    let name = regex::escape(placeholder);
    let quoted = format!("'{}'", dialect);

    let before = Regex::new(&format!(r"(^|[^\w$]){}(\s*[!=]==)", name))?;
    let after = Regex::new(&format!(r"([!=]==\s*){}($|[^\w$])", name))?;

    let text = before.replace_all(text, format!("${{1}}{}${{2}}", quoted));
    let text = after.replace_all(&text, format!("${{1}}{}${{2}}", quoted));
    Ok(text.into_owned())
}

/// Whether the operand ending `before` is bound by an operator tighter
/// than `===`, as in `'a' + 'b' === 'ab'`.
fn bound_before(before: &str) -> bool {
    let before = before.trim_end();
    if before.ends_with("=>") {
        return false;
    }
    if ["==", "!=", "<=", ">="].iter().any(|op| before.ends_with(op)) {
        return true;
    }
    if before.ends_with(['+', '-', '*', '/', '%', '<', '>', '!', '~']) {
        return true;
    }
    let word = before
        .rsplit(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .next()
        .unwrap_or("");
    matches!(word, "typeof" | "void" | "await" | "in" | "instanceof")
}

/// Whether the operand starting `after` is bound by an operator tighter
/// than `===`, as in `'a' === 'b' + 'c'`.
fn bound_after(after: &str) -> bool {
    let after = after.trim_start();
    if after.starts_with("//") || after.starts_with("/*") {
        return false;
    }
    if after.starts_with("?.")
        || after.starts_with(['+', '-', '*', '/', '%', '<', '>', '.', '['])
    {
        return true;
    }
    let word = after
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .next()
        .unwrap_or("");
    matches!(word, "in" | "instanceof")
}

/// Remove backslash escapes so `'it\'s'` and `"it's"` compare equal.
fn unescape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

/// Fold `'a' === 'b'` and `'a' !== 'b'` (either quote style) to a boolean.
///
/// A comparison whose operands are bound by a tighter operator is left
/// untouched, since its literals are not the operands of `===`.
pub fn fold_literals(text: &str) -> Result<String> {
    let comparison = Regex::new(
        r#"(?:'((?:[^'\\\n]|\\.)*)'|"((?:[^"\\\n]|\\.)*)")\s*(===|!==)\s*(?:'((?:[^'\\\n]|\\.)*)'|"((?:[^"\\\n]|\\.)*)")"#,
    )?;

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in comparison.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if bound_before(&text[..whole.start()]) || bound_after(&text[whole.end()..]) {
            continue;
        }

        let left = caps.get(1).or_else(|| caps.get(2)).map(|m| unescape(m.as_str()));
        let right = caps.get(4).or_else(|| caps.get(5)).map(|m| unescape(m.as_str()));
        let equal = left == right;
        let result = if &caps[3] == "===" { equal } else { !equal };

        out.push_str(&text[last..whole.start()]);
        out.push_str(if result { "true" } else { "false" });
        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}

/// All directive processing for one dialect, in order.
pub fn resolve_directives(
    template: &str,
    text: &str,
    dialect: Dialect,
    placeholder: &str,
) -> Result<String> {
    let text = resolve_lines(template, text, dialect)?;
    let text = substitute_placeholder(&text, placeholder, dialect)?;
    fold_literals(&text)
}

/// Resolves conditional directives for the dialect being generated.
pub struct DirectivesPass;

impl Pass for DirectivesPass {
    fn name(&self) -> &'static str {
        "directives"
    }

    fn description(&self) -> &'static str {
        "Apply insert/remove directives, substitute the dialect placeholder, fold literal comparisons"
    }

    fn stage(&self) -> Stage {
        Stage::Directives
    }

    fn run(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        ctx.text = resolve_directives(
            &ctx.template.name,
            &ctx.text,
            ctx.dialect(),
            &ctx.manifest.generator.placeholder,
        )?;
        Ok(())
    }
}
