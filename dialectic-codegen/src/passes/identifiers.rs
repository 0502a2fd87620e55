//! Identifier rewriting from the reference dialect's vocabulary.
//!
//! Rules, in order:
//!
//! 1. session type annotations `: PgSession` gain the dialect's session
//!    arguments unless they already have a `<...>` list
//! 2. exact renames from the profile
//! 3. module paths `pg-` become `<module_prefix>-`
//! 4. type names `Pg...` become `<type_prefix>...`

use dialectic_core::split_lines_inclusive;
use dialectic_manifest::DialectProfile;
use eyre::Result;
use regex::{Captures, NoExpand, Regex, Replacer};
use tracing::debug;

use super::snippet::is_marker;
use crate::pipeline::{Pass, RenderContext, Stage};

/// Pattern matching `name` as a whole identifier. The character before the
/// name is captured as group 1 and must be put back.
fn identifier_pattern(name: &str) -> String {
    let trailing = if name.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    format!(r"(^|[^\w$]){}{}", regex::escape(name), trailing)
}

fn count_and_replace(regex: &Regex, text: &str, replacement: impl Replacer) -> (String, usize) {
    let count = regex.find_iter(text).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (regex.replace_all(text, replacement).into_owned(), count)
}

/// Append `params` to `: Session` annotations that have no type arguments.
pub fn add_session_params(text: &str, session: &str, params: &str) -> Result<(String, usize)> {
    let regex = Regex::new(&format!(r":\s*{}\b(\s*<)?", regex::escape(session)))?;
    let mut count = 0;
    let text = regex.replace_all(text, |caps: &Captures| {
        if caps.get(1).is_some() {
            return caps[0].to_string();
        }
        count += 1;
        format!("{}<{}>", &caps[0], params)
    });
    Ok((text.into_owned(), count))
}

/// Rewrite `text` from `reference` identifiers to `profile` identifiers.
pub fn rewrite_identifiers(
    text: &str,
    sessions: &[String],
    reference: &DialectProfile,
    profile: &DialectProfile,
) -> Result<String> {
    let mut text = text.to_string();

    if let Some(params) = &profile.session_params {
        for session in sessions {
            let (rewritten, count) = add_session_params(&text, session, params)?;
            debug!(session = %session, count, "session annotations");
            text = rewritten;
        }
    }

    for (from, to) in &profile.renames {
        let regex = Regex::new(&identifier_pattern(from))?;
        let (rewritten, count) =
            count_and_replace(&regex, &text, |caps: &Captures| format!("{}{}", &caps[1], to));
        debug!(from = %from, to = %to, count, "rename");
        text = rewritten;
    }

    if reference.module_prefix != profile.module_prefix {
        let regex = Regex::new(&format!(r"\b{}-", regex::escape(&reference.module_prefix)))?;
        let replacement = format!("{}-", profile.module_prefix);
        let (rewritten, count) = count_and_replace(&regex, &text, NoExpand(&replacement));
        debug!(count, "module prefix");
        text = rewritten;
    }

    if reference.type_prefix != profile.type_prefix {
        let regex = Regex::new(&format!(r"\b{}", regex::escape(&reference.type_prefix)))?;
        let (rewritten, count) = count_and_replace(&regex, &text, NoExpand(&profile.type_prefix));
        debug!(count, "type prefix");
        text = rewritten;
    }

    Ok(text)
}

/// [`rewrite_identifiers`] on everything but snippet marker lines.
///
/// Overrides are keyed by the names written in the template, so a region
/// called `PgThen` keeps that key for every dialect.
fn rewrite_outside_markers(
    text: &str,
    sessions: &[String],
    reference: &DialectProfile,
    profile: &DialectProfile,
) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chunk = String::new();
    for line in split_lines_inclusive(text) {
        if is_marker(line) {
            out.push_str(&rewrite_identifiers(&chunk, sessions, reference, profile)?);
            out.push_str(line);
            chunk.clear();
        } else {
            chunk.push_str(line);
        }
    }
    out.push_str(&rewrite_identifiers(&chunk, sessions, reference, profile)?);
    Ok(out)
}

/// Rewrites reference-dialect identifiers into the target dialect's names.
pub struct IdentifiersPass;

impl Pass for IdentifiersPass {
    fn name(&self) -> &'static str {
        "identifiers"
    }

    fn description(&self) -> &'static str {
        "Rename module paths, type prefixes, session annotations and explicit renames"
    }

    fn stage(&self) -> Stage {
        Stage::Identifiers
    }

    fn run(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        ctx.text = rewrite_outside_markers(
            &ctx.text,
            &ctx.manifest.types.sessions,
            ctx.reference,
            ctx.profile,
        )?;
        Ok(())
    }
}
