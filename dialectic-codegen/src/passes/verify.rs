//! Output checks.

use eyre::Result;

use super::{directives::parse_directive, snippet::is_marker};
use crate::{
    TemplateError,
    pipeline::{Pass, RenderContext, Stage},
};

/// Find the first directive or snippet marker left in `text`, with its
/// 1-based line number.
pub fn find_residue(text: &str) -> Option<(usize, String)> {
    text.lines().enumerate().find_map(|(idx, line)| {
        (parse_directive(line).is_some() || is_marker(line))
            .then(|| (idx + 1, line.trim().to_string()))
    })
}

/// Rejects variant output that still contains template syntax.
pub struct VerifyPass;

impl Pass for VerifyPass {
    fn name(&self) -> &'static str {
        "verify"
    }

    fn description(&self) -> &'static str {
        "Reject output that still contains directives or snippet markers"
    }

    fn stage(&self) -> Stage {
        Stage::Verify
    }

    fn run(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        if let Some((line, marker)) = find_residue(&ctx.text) {
            return Err(TemplateError::Residue {
                template: ctx.template.name.clone(),
                dialect: ctx.dialect().to_string(),
                marker,
                line,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_output() {
        assert_eq!(find_residue("const a = 1\n// a comment\n"), None);
    }

    #[test]
    fn test_directive_residue() {
        assert_eq!(
            find_residue("a\n  // mysql-insert: x\n"),
            Some((2, "// mysql-insert: x".to_string()))
        );
    }

    #[test]
    fn test_marker_residue() {
        assert_eq!(
            find_residue("// @end then\n"),
            Some((1, "// @end then".to_string()))
        );
    }
}
