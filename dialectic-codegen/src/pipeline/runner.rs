//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::Result;
use tracing::debug;

use super::{Pass, PassInfo, Plugin, RenderContext};
use crate::{
    passes::{
        DirectivesPass, IdentifiersPass, ReplacePass, SnippetPass, TypeParamsPass, VerifyPass,
    },
    replacer::ReplacerRegistry,
};

/// The rendering pipeline.
///
/// The pipeline owns the ordered list of passes and the plugins that observe
/// them. Passes are kept sorted by [`Stage`](super::Stage); passes sharing a
/// stage run in registration order.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(Arc::new(ReplacerRegistry::with_builtins()))
///     .plugin(SnapshotPlugin::with_output_dir(".dialectic/snapshots"));
///
/// let mut ctx = RenderContext::new(&template, &profile, &reference, &manifest);
/// pipeline.run(&mut ctx)?;
/// ```
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline with the built-in passes.
    pub fn new(replacers: Arc<ReplacerRegistry>) -> Self {
        Self::empty()
            .pass(ReplacePass::new(replacers))
            .pass(DirectivesPass)
            .pass(TypeParamsPass)
            .pass(IdentifiersPass)
            .pass(SnippetPass)
            .pass(VerifyPass)
    }

    /// Create a pipeline with no passes.
    pub fn empty() -> Self {
        Self {
            passes: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a pass; it is placed according to its stage.
    pub fn pass(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self.passes.sort_by_key(|p| p.stage());
        self
    }

    /// Add a plugin to receive pass lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Information about every pass, in execution order.
    pub fn passes(&self) -> Vec<PassInfo> {
        self.passes.iter().map(|p| p.info()).collect()
    }

    /// Run every pass over the context, calling plugin hooks around each.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a pass or a plugin.
    pub fn run(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        for pass in &self.passes {
            self.run_pass(pass.as_ref(), ctx)?;
        }
        Ok(())
    }

    fn run_pass(&self, pass: &dyn Pass, ctx: &mut RenderContext<'_>) -> Result<()> {
        let pass_name = pass.name();

        for plugin in &self.plugins {
            plugin.on_before_pass(pass_name, ctx)?;
        }

        let before = ctx.text.len();
        pass.run(ctx)?;
        debug!(
            template = %ctx.template.name,
            dialect = %ctx.dialect(),
            pass = pass_name,
            bytes_before = before,
            bytes_after = ctx.text.len(),
            "pass complete"
        );

        for plugin in &self.plugins {
            plugin.on_after_pass(pass_name, ctx)?;
        }

        Ok(())
    }
}
