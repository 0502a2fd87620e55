//! List operation - the template × dialect matrix.

use dialectic_codegen::Generator;
use dialectic_manifest::DialecticToml;
use eyre::Result;

use crate::reports::ListReport;

/// Execute the list operation.
pub fn list(toml: &DialecticToml) -> Result<ListReport> {
    let generator = Generator::from_toml(toml)?;
    let templates = generator.load_templates()?;

    Ok(ListReport {
        templates_dir: generator.templates_dir(),
        output_dir: generator.output_dir(),
        reference: generator.manifest().reference(),
        rows: generator.matrix(&templates),
        passes: generator.pipeline().passes(),
    })
}
