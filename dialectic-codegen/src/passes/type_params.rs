//! Extra generic parameters for the query builder types.
//!
//! Variant dialects' builders take extra leading type parameters. They are
//! added at three kinds of sites, matched on the canonical (reference) names:
//!
//! 1. declarations `interface|class|type Builder<` get the full parameter code
//! 2. related query-result types `Query<` get the bare parameter names
//! 3. any other `Builder<` (`extends`, annotations, `as` casts, generic
//!    arguments) gets one `any` per slot

use dialectic_manifest::{TypeNames, TypeParams};
use eyre::Result;
use regex::{Captures, Regex};
use tracing::debug;

use crate::pipeline::{Pass, RenderContext, Stage};

/// Number of sites rewritten per class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectedSites {
    pub declarations: usize,
    pub usages: usize,
    pub references: usize,
}

impl InjectedSites {
    pub fn total(&self) -> usize {
        self.declarations + self.usages + self.references
    }
}

/// Separator after the inserted parameters, mirroring the whitespace that
/// followed `<`.
fn separator(whitespace: &str) -> String {
    if whitespace.is_empty() {
        ", ".to_string()
    } else {
        format!(",{}", whitespace)
    }
}

/// Insert `inserted` right after every match of `regex`. The last capture
/// group of `regex` must be the whitespace following `<`.
fn insert_after(regex: &Regex, text: &str, inserted: &str, count: &mut usize) -> String {
    regex
        .replace_all(text, |caps: &Captures| {
            *count += 1;
            let ws = caps.get(caps.len() - 1).map_or("", |m| m.as_str());
            format!("{}{}{}", &caps[0], inserted, separator(ws))
        })
        .into_owned()
}

/// Inject `params` at every builder and query-type site in `text`.
pub fn inject_type_params(
    text: &str,
    types: &TypeNames,
    params: &TypeParams,
) -> Result<(String, InjectedSites)> {
    let mut sites = InjectedSites::default();

    // Group 1 is the declaring keyword, absent at every other site.
    let builder = Regex::new(&format!(
        r"\b((?:interface|class|type)\s+)?{}<(\s*)",
        regex::escape(&types.builder)
    ))?;
    let permissive = params.permissive_arguments();
    let mut text = builder
        .replace_all(text, |caps: &Captures| {
            let inserted = if caps.get(1).is_some() {
                sites.declarations += 1;
                &params.code
            } else {
                sites.references += 1;
                &permissive
            };
            format!("{}{}{}", &caps[0], inserted, separator(&caps[2]))
        })
        .into_owned();

    let arguments = params.arguments();
    for query in &types.queries {
        let usage = Regex::new(&format!(r"\b{}<(\s*)", regex::escape(query)))?;
        text = insert_after(&usage, &text, &arguments, &mut sites.usages);
    }

    Ok((text, sites))
}

/// Adds the dialect's extra type parameters to builder and query types.
pub struct TypeParamsPass;

impl Pass for TypeParamsPass {
    fn name(&self) -> &'static str {
        "type-params"
    }

    fn description(&self) -> &'static str {
        "Inject extra generic parameters at builder declarations, query usages and references"
    }

    fn stage(&self) -> Stage {
        Stage::TypeParams
    }

    fn run(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let Some(params) = &ctx.profile.type_params else {
            return Ok(());
        };
        if params.slots == 0 {
            return Ok(());
        }

        let (text, sites) = inject_type_params(&ctx.text, &ctx.manifest.types, params)?;
        ctx.text = text;

        debug!(
            template = %ctx.template.name,
            dialect = %ctx.dialect(),
            declarations = sites.declarations,
            usages = sites.usages,
            references = sites.references,
            "type parameters injected"
        );
        if sites.total() == 0 {
            ctx.add_info(self.name(), "no builder or query type sites found");
        }
        Ok(())
    }
}
