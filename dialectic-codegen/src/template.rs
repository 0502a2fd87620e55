//! Canonical template loading.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::Serialize;

/// One canonical source module, written in the reference dialect's vocabulary.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    /// File stem, e.g. `count` or `$withRecursive`.
    pub name: String,
    /// File name including the extension.
    pub file_name: String,
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(skip)]
    pub source: String,
}

impl Template {
    /// Build a template from in-memory source.
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let name = stem(&file_name).to_string();
        Self {
            path: PathBuf::from(&file_name),
            name,
            file_name,
            source: source.into(),
        }
    }

    /// Read a template from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read template '{}'", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name: stem(&file_name).to_string(),
            file_name,
            path: path.to_path_buf(),
            source,
        })
    }
}

fn stem(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem)
}

/// List the files in `dir` whose extension is one of `extensions`, sorted by
/// file name. Subdirectories are not descended into.
pub fn list_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .wrap_err_with(|| format!("failed to read directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.wrap_err_with(|| format!("failed to read '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e == ext));
        if matches {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Load every template in `dir`, sorted by file name.
pub fn load_templates(dir: &Path, extensions: &[String]) -> Result<Vec<Template>> {
    list_files(dir, extensions)?
        .into_iter()
        .map(Template::read)
        .collect()
}
