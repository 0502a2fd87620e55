use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// A dialectic.toml on disk: raw content plus the parsed manifest.
///
/// Relative paths in the manifest are resolved against the directory that
/// contains the file.
#[derive(Debug)]
pub struct DialecticToml {
    path: PathBuf,
    root: PathBuf,
    content: String,
    manifest: Manifest,
}

impl DialecticToml {
    /// Open and parse a dialectic.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            path,
            root,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory relative manifest paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Resolve a manifest path against the manifest's directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_resolves_against_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialectic.toml");
        std::fs::write(&path, "[generator]\noutput = \"out\"").unwrap();

        let toml = DialecticToml::open(&path).unwrap();
        assert_eq!(toml.root(), dir.path());
        assert_eq!(
            toml.resolve(&toml.manifest().generator.output),
            dir.path().join("out")
        );
        assert!(toml.content().contains("output"));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DialecticToml::open(dir.path().join("dialectic.toml")).unwrap_err();
        assert!(matches!(*err, crate::Error::Io { .. }));
    }

    #[test]
    fn test_bare_filename_resolves_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialectic.toml");
        std::fs::write(&path, "").unwrap();
        let toml = DialecticToml::open(&path).unwrap();
        assert_eq!(toml.path(), path.as_path());
    }
}
