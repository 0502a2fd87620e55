//! Pipeline pass trait.

use eyre::Result;
use serde::Serialize;

use super::RenderContext;

/// Position of a pass in the pipeline.
///
/// Passes run in `Stage` order, so the ordering between built-in and custom
/// passes does not depend on registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Per-template custom replacers; they see the raw template.
    Replace,
    /// Line directives, placeholder substitution and literal folding.
    Directives,
    /// Extra generic parameters, keyed on the canonical type names.
    TypeParams,
    /// Session parameters, renames and prefix rewrites.
    Identifiers,
    /// Snippet regions, filled after renaming so overrides are taken verbatim.
    Snippets,
    /// Output checks; must not modify the text.
    Verify,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Stage; 6] = [
        Stage::Replace,
        Stage::Directives,
        Stage::TypeParams,
        Stage::Identifiers,
        Stage::Snippets,
        Stage::Verify,
    ];

    /// Kebab-case name, as shown by `dialectic list`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Replace => "replace",
            Stage::Directives => "directives",
            Stage::TypeParams => "type-params",
            Stage::Identifiers => "identifiers",
            Stage::Snippets => "snippets",
            Stage::Verify => "verify",
        }
    }
}

/// Information about a pipeline pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassInfo {
    /// The pass name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
    /// When the pass runs.
    pub stage: Stage,
}

/// A pass in the rendering pipeline.
///
/// Each pass is a text transform `(text, dialect profile) -> text` over
/// [`RenderContext::text`].
///
/// Built-in passes:
/// - `ReplacePass` - per-template replacers
/// - `DirectivesPass` - conditional directives
/// - `TypeParamsPass` - extra generic parameters
/// - `IdentifiersPass` - identifier rewriting
/// - `SnippetPass` - snippet regions
/// - `VerifyPass` - residue check
pub trait Pass: Send + Sync {
    /// The name of this pass (used in diagnostics, snapshots and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this pass does.
    fn description(&self) -> &'static str;

    /// When this pass runs.
    fn stage(&self) -> Stage;

    /// Run this pass on the render context.
    ///
    /// # Errors
    ///
    /// Returns an error if the pair cannot be rendered. Non-fatal findings
    /// should be recorded as diagnostics instead.
    fn run(&self, ctx: &mut RenderContext<'_>) -> Result<()>;

    /// Get information about this pass.
    fn info(&self) -> PassInfo {
        PassInfo {
            name: self.name(),
            description: self.description(),
            stage: self.stage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let mut stages = Stage::ALL.to_vec();
        stages.reverse();
        stages.sort();
        assert_eq!(stages, Stage::ALL.to_vec());
        assert_eq!(Stage::TypeParams.as_str(), "type-params");
    }
}
