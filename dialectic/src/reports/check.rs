//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from an in-memory render of every pair.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Number of templates found.
    pub templates: usize,
    /// Number of modules that rendered.
    pub modules: usize,
    /// Number of gated pairs.
    pub gated: usize,
    /// Failed pairs and error diagnostics.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid ({} templates, {} modules, {} gated)",
                self.config_path.display(),
                self.templates,
                self.modules,
                self.gated
            ));
        } else {
            out.preformatted(&format!("✗ {} error(s)", self.errors.len()));
        }
    }
}
