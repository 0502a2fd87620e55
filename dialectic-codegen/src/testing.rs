//! Test utilities for generation runs.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use dialectic_manifest::Manifest;
use eyre::{Context, Result};

use crate::Generator;

/// A project laid out in a temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct Fixture {
    dir: tempfile::TempDir,
    manifest: String,
}

impl Fixture {
    /// Create a fixture whose `dialectic.toml` is `manifest`.
    pub fn new(manifest: &str) -> Result<Self> {
        let dir = tempfile::TempDir::new()?;
        std::fs::write(dir.path().join("dialectic.toml"), manifest)?;
        Ok(Self {
            dir,
            manifest: manifest.to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file at `path`, relative to the fixture root.
    pub fn file(self, path: &str, content: &str) -> Result<Self> {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full, content)
            .wrap_err_with(|| format!("failed to write fixture '{}'", full.display()))?;
        Ok(self)
    }

    /// A generator for the fixture's manifest, rooted at the fixture.
    pub fn generator(&self) -> Result<Generator> {
        let manifest = Manifest::from_str(&self.manifest)?;
        Generator::new(manifest, self.dir.path())
    }

    /// Every file under `path` (relative to the root), keyed by its path
    /// relative to `path` with `/` separators.
    pub fn tree(&self, path: &str) -> Result<BTreeMap<String, String>> {
        let base = self.dir.path().join(path);
        let mut files = BTreeMap::new();
        if base.exists() {
            collect(&base, &base, &mut files)?;
        }
        Ok(files)
    }
}

fn collect(base: &Path, dir: &Path, files: &mut BTreeMap<String, String>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path: PathBuf = entry?.path();
        if path.is_dir() {
            collect(base, &path, files)?;
        } else {
            let relative = path
                .strip_prefix(base)?
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            files.insert(relative, std::fs::read_to_string(&path)?);
        }
    }
    Ok(())
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected == actual {
        return;
    }

    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let mut diff = String::new();

    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
        let act = actual_lines.get(i).copied().unwrap_or("<missing>");
        if exp != act {
            diff.push_str(&format!("Line {}:\n", i + 1));
            diff.push_str(&format!("  expected: {}\n", exp));
            diff.push_str(&format!("  actual:   {}\n", act));
        }
    }
    if diff.is_empty() {
        diff.push_str("(contents differ only in trailing newlines)\n");
    }

    panic!("Content mismatch:\n{}", diff);
}
