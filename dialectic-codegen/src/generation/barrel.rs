//! Barrel files re-exporting a dialect's extra modules.

use std::path::Path;

use eyre::{Context, Result};

/// An ordered list of `export * from './<stem>'` lines.
///
/// Entries are only ever appended; their order is the order of the public
/// exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Barrel {
    lines: Vec<String>,
}

impl Barrel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the barrel at `path`, if it exists, keeping its lines.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read barrel '{}'", path.display()))?;
        Ok(Self {
            lines: content
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    /// The export line for module `stem`.
    pub fn export_line(stem: &str) -> String {
        format!("export * from './{}'", stem)
    }

    /// Append an export for `stem` unless the barrel already has it.
    ///
    /// Returns `true` when a line was added.
    pub fn append(&mut self, stem: &str) -> bool {
        let line = Self::export_line(stem);
        if self.lines.contains(&line) {
            return false;
        }
        self.lines.push(line);
        true
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut barrel = Barrel::new();
        assert!(barrel.append("instr"));
        assert!(barrel.append("concat"));
        assert!(!barrel.append("instr"));

        assert_eq!(
            barrel.render(),
            "export * from './instr'\nexport * from './concat'\n"
        );
    }

    #[test]
    fn test_empty_barrel_renders_nothing() {
        assert_eq!(Barrel::new().render(), "");
    }

    #[test]
    fn test_load_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.ts");
        std::fs::write(&path, "export * from './instr'\n\n").unwrap();

        let mut barrel = Barrel::load(&path).unwrap();
        assert_eq!(barrel.len(), 1);
        assert!(!barrel.append("instr"));
        assert!(barrel.append("concat"));

        assert!(Barrel::load(&temp.path().join("missing.ts")).unwrap().is_empty());
    }
}
