//! Manifest parsing and validation.

use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
};

use super::{
    Manifest,
    profile::count_params,
    validate::{ParseContext, validate_snippet_key},
};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "dialectic.toml")
    }
}

impl Manifest {
    /// Parse a dialectic.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    validate_generator(manifest, &ctx)?;
    validate_dialects(manifest, &ctx)?;
    validate_replacers(manifest, &ctx)?;
    validate_layout(manifest, &ctx)?;
    Ok(())
}

fn validate_generator(manifest: &Manifest, ctx: &ParseContext) -> Result<()> {
    let generator = &manifest.generator;
    let generator_ctx = ctx.push("generator");

    generator_ctx.validate_name(&generator.placeholder, "placeholder")?;

    if generator.extensions.is_empty() {
        return Err(generator_ctx.error_at(
            "at least one template extension is required",
            "extensions",
        ));
    }
    for ext in &generator.extensions {
        if ext.is_empty() || ext.contains('.') || ext.contains('/') {
            return Err(generator_ctx.error_at(
                format!("extension '{}' must be a bare suffix without a dot", ext),
                ext,
            ));
        }
    }

    if generator.barrel.is_empty() || generator.barrel.contains('/') {
        return Err(generator_ctx.error_at(
            format!("barrel '{}' must be a plain file name", generator.barrel),
            "barrel",
        ));
    }

    let types = &manifest.types;
    let types_ctx = ctx.push("types");
    types_ctx.validate_name(&types.builder, "builder type")?;
    for name in types.queries.iter().chain(&types.sessions) {
        types_ctx.validate_name(name, "type name")?;
    }

    Ok(())
}

fn validate_dialects(manifest: &Manifest, ctx: &ParseContext) -> Result<()> {
    let reference = manifest.reference();

    for (dialect, overrides) in &manifest.dialects {
        let dialect_ctx = ctx.push("dialects").push(dialect.as_str());

        if *dialect == reference
            && let Some(field) = overrides.variant_only_fields().first()
        {
            return Err(ctx.source_context().reference_override_error(
                dialect.as_str(),
                *field,
                ctx.find_span(field),
            ));
        }

        if let Some(prefix) = &overrides.type_prefix {
            dialect_ctx.validate_name(prefix, "type prefix")?;
        }
        if let Some(prefix) = &overrides.module_prefix
            && (prefix.is_empty() || prefix.contains(char::is_whitespace))
        {
            return Err(dialect_ctx.error_at(
                format!("module prefix '{}' must be a non-empty word", prefix),
                prefix,
            ));
        }

        if let Some(slots) = overrides.type_param_slots {
            let code = overrides
                .type_params
                .clone()
                .or_else(|| dialect.profile().type_params.map(|p| p.code))
                .unwrap_or_default();
            let declared = count_params(&code);
            if slots != declared {
                return Err(dialect_ctx.error_at(
                    format!(
                        "type_param_slots = {} but {} declares {} parameter(s)",
                        slots,
                        dialect,
                        declared
                    ),
                    "type_param_slots",
                ));
            }
        }

        for (from, to) in &overrides.renames {
            dialect_ctx.validate_name(from, "rename source")?;
            dialect_ctx.validate_name(to, "rename target")?;
        }

        if let Some(unsupported) = &overrides.unsupported
            && unsupported.iter().any(|name| name.trim().is_empty())
        {
            return Err(dialect_ctx.error_at(
                format!("unsupported list for {} contains an empty name", dialect),
                "unsupported",
            ));
        }

        for key in overrides.snippets.keys() {
            if let Some(reason) = validate_snippet_key(key) {
                return Err(dialect_ctx.error_at(
                    format!("invalid snippet key '{}' in {}: {}", key, dialect, reason),
                    key,
                ));
            }
        }
    }

    Ok(())
}

fn validate_replacers(manifest: &Manifest, ctx: &ParseContext) -> Result<()> {
    let reference = manifest.reference();

    for replacer in &manifest.replacers {
        if replacer.template.trim().is_empty() {
            return Err(ctx.error_at("replacer template cannot be empty", "template"));
        }

        if let Err(e) = regex::Regex::new(&replacer.pattern) {
            return Err(ctx.source_context().invalid_pattern_error(
                &replacer.template,
                e,
                ctx.find_span(&replacer.pattern),
            ));
        }

        if let Some(dialects) = &replacer.dialects {
            if dialects.is_empty() {
                return Err(ctx.error_at(
                    format!(
                        "replacer for '{}' lists no dialects; omit the key to target every variant",
                        replacer.template
                    ),
                    "dialects",
                ));
            }
            if dialects.contains(&reference) {
                return Err(ctx.source_context().reference_override_error(
                    reference.as_str(),
                    "replacers",
                    ctx.find_span(&replacer.template),
                ));
            }
        }
    }

    Ok(())
}

/// Output directories must not swallow the inputs, or clearing them before a
/// run would delete the templates.
fn validate_layout(manifest: &Manifest, ctx: &ParseContext) -> Result<()> {
    let generator = &manifest.generator;
    let templates = normalize(&generator.templates);

    for profile in manifest.profiles() {
        let out = normalize(&generator.output.join(profile.dialect.as_str()));

        if templates.starts_with(&out) {
            return Err(ctx.error_at(
                format!(
                    "templates directory '{}' lies inside the {} output directory '{}'",
                    generator.templates.display(),
                    profile.dialect,
                    out.display()
                ),
                "templates",
            ));
        }

        for other in manifest.profiles() {
            if let Some(extras) = &other.extras
                && normalize(extras).starts_with(&out)
            {
                return Err(ctx.error_at(
                    format!(
                        "extras directory '{}' for {} lies inside the {} output directory '{}'",
                        extras.display(),
                        other.dialect,
                        profile.dialect,
                        out.display()
                    ),
                    "extras",
                ));
            }
        }
    }

    Ok(())
}

/// Lexically normalize a relative path: drop `.` segments and fold `..`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}
