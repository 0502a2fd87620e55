//! Per-template custom replacers.

use std::sync::Arc;

use eyre::Result;
use tracing::debug;

use crate::{
    TemplateError,
    pipeline::{Pass, RenderContext, Stage},
    replacer::ReplacerRegistry,
};

/// Runs the replacers registered for the current template.
pub struct ReplacePass {
    registry: Arc<ReplacerRegistry>,
}

impl ReplacePass {
    pub fn new(registry: Arc<ReplacerRegistry>) -> Self {
        Self { registry }
    }
}

impl Pass for ReplacePass {
    fn name(&self) -> &'static str {
        "replace"
    }

    fn description(&self) -> &'static str {
        "Apply the custom replacers registered for the template"
    }

    fn stage(&self) -> Stage {
        Stage::Replace
    }

    fn run(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let dialect = ctx.dialect();

        for replacer in self.registry.get(&ctx.template.name) {
            if !replacer.applies_to(dialect) {
                continue;
            }
            let text = replacer.apply(&ctx.text, ctx).map_err(|e| TemplateError::Replacer {
                template: ctx.template.name.clone(),
                replacer: replacer.name().to_string(),
                message: format!("{e:#}"),
            })?;
            debug!(
                template = %ctx.template.name,
                dialect = %dialect,
                replacer = replacer.name(),
                "replacer applied"
            );
            ctx.text = text;
        }

        Ok(())
    }
}
