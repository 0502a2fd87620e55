//! List command report data structures.

use std::path::PathBuf;

use dialectic_codegen::{Availability, MatrixRow, pipeline::PassInfo};
use dialectic_manifest::Dialect;
use serde::Serialize;

use super::output::{Output, Report};

/// The template × dialect matrix.
#[derive(Debug, Serialize)]
pub struct ListReport {
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    pub reference: Dialect,
    pub rows: Vec<MatrixRow>,
    /// Passes applied to variant dialects, in order.
    pub passes: Vec<PassInfo>,
}

fn cell(availability: Availability) -> &'static str {
    match availability {
        Availability::Reference => "reference",
        Availability::Generated => "generated",
        Availability::Gated => "gated",
    }
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.rows.is_empty() {
            out.preformatted(&format!(
                "No templates in {}",
                self.templates_dir.display()
            ));
            return;
        }

        out.key_value("Templates", &self.templates_dir.display().to_string());
        out.key_value("Output", &self.output_dir.display().to_string());
        out.newline();

        let width = self
            .rows
            .iter()
            .map(|r| r.template.len())
            .max()
            .unwrap_or(0)
            .max("template".len());

        let mut header = format!("{:width$}", "template");
        for dialect in Dialect::ALL {
            header.push_str(&format!("  {:9}", dialect.as_str()));
        }
        out.preformatted(header.trim_end());

        for row in &self.rows {
            let mut line = format!("{:width$}", row.template);
            for (_, availability) in &row.dialects {
                line.push_str(&format!("  {:9}", cell(*availability)));
            }
            if !row.replacers.is_empty() {
                line.push_str(&format!("  [{}]", row.replacers.join(", ")));
            }
            out.preformatted(line.trim_end());
        }

        out.newline();
        out.section("Passes");
        for (i, pass) in self.passes.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", pass.name, pass.description));
        }
    }
}
