//! Per-dialect `tsconfig.json` stub.

use std::path::{Path, PathBuf};

use dialectic_core::{FileRules, GeneratedFile};
use serde_json::json;

/// A minimal `tsconfig.json` that extends the project's config, so each
/// dialect directory type-checks on its own. Only created if missing.
pub struct TsConfigStub {
    extends: String,
}

impl TsConfigStub {
    pub fn new(extends: impl Into<String>) -> Self {
        Self {
            extends: extends.into(),
        }
    }
}

impl GeneratedFile for TsConfigStub {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("tsconfig.json")
    }

    fn rules(&self) -> FileRules {
        FileRules::create_once()
    }

    fn render(&self) -> String {
        let value = json!({
            "extends": self.extends,
            "include": ["."],
        });
        // Serializing a `json!` literal cannot fail.
        let mut out = serde_json::to_string_pretty(&value).unwrap_or_default();
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use dialectic_core::{Overwrite, WriteResult};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_render() {
        let stub = TsConfigStub::new("../../tsconfig.json");
        assert_eq!(
            stub.render(),
            "{\n  \"extends\": \"../../tsconfig.json\",\n  \"include\": [\n    \".\"\n  ]\n}\n"
        );
        assert_eq!(stub.rules().overwrite, Overwrite::IfMissing);
    }

    #[test]
    fn test_write_keeps_existing() {
        let temp = TempDir::new().unwrap();
        let stub = TsConfigStub::new("../tsconfig.json");

        assert_eq!(stub.write(temp.path()).unwrap(), WriteResult::Written);
        std::fs::write(temp.path().join("tsconfig.json"), "{}").unwrap();
        assert_eq!(stub.write(temp.path()).unwrap(), WriteResult::Skipped);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("tsconfig.json")).unwrap(),
            "{}"
        );
    }
}
