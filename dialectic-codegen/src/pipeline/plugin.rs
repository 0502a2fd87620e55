//! Pipeline plugin trait for extensibility.

use std::sync::Arc;

use eyre::Result;

use super::RenderContext;

/// A plugin that can hook into the rendering pipeline.
///
/// Plugins are called around every pass of every variant pair and may
/// inspect or modify the text being rendered.
///
/// # Example
///
/// ```ignore
/// struct SizePlugin;
///
/// impl Plugin for SizePlugin {
///     fn name(&self) -> &'static str { "size" }
///
///     fn on_after_pass(&self, pass: &str, ctx: &mut RenderContext<'_>) -> Result<()> {
///         tracing::trace!(pass, dialect = %ctx.dialect(), bytes = ctx.text.len());
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a pass runs.
    ///
    /// # Errors
    ///
    /// Return an error to abort rendering of the current pair.
    #[allow(unused_variables)]
    fn on_before_pass(&self, pass: &str, ctx: &mut RenderContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after a pass completes successfully.
    ///
    /// # Errors
    ///
    /// Return an error to abort rendering of the current pair.
    #[allow(unused_variables)]
    fn on_after_pass(&self, pass: &str, ctx: &mut RenderContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Shared plugins, so the caller can keep a handle and read results back.
impl<P: Plugin + ?Sized> Plugin for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_pass(&self, pass: &str, ctx: &mut RenderContext<'_>) -> Result<()> {
        (**self).on_before_pass(pass, ctx)
    }

    fn on_after_pass(&self, pass: &str, ctx: &mut RenderContext<'_>) -> Result<()> {
        (**self).on_after_pass(pass, ctx)
    }
}
