//! File registration for a generation run.
//!
//! Every file of a run is registered first and written afterwards, so a run
//! either renders completely or leaves the output tree untouched.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//!
//! // Per-dialect project stub (only if missing)
//! registry.register(FileEntry::from_generated("sqlite/tsconfig.json", &stub, FileCategory::Config));
//!
//! // Rendered modules (always overwritten)
//! registry.register(FileEntry::generated("sqlite/count.ts", module.content));
//!
//! registry.write_all(&output_dir)?;
//! ```

use std::path::{Path, PathBuf};

use dialectic_core::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
use eyre::Result;
use serde::Serialize;

/// Category of generated file, determining write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Per-dialect project stubs (`tsconfig.json`), only created if missing.
    Config,
    /// Modules rendered from templates.
    Generated,
    /// Dialect-only modules copied verbatim.
    Extra,
    /// Barrel files re-exporting the extra modules. Written last.
    Barrel,
}

impl FileCategory {
    /// Get the default overwrite behavior for this category.
    pub fn default_overwrite(&self) -> Overwrite {
        match self {
            FileCategory::Config => Overwrite::IfMissing,
            _ => Overwrite::Always,
        }
    }
}

/// A file to be written, relative to the output root.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the output root, e.g. `sqlite/count.ts`.
    pub path: PathBuf,
    pub content: String,
    pub category: FileCategory,
    /// Override default overwrite behavior.
    pub overwrite: Option<Overwrite>,
}

impl FileEntry {
    /// Create a new file entry with the given category.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, category: FileCategory) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category,
            overwrite: None,
        }
    }

    /// A rendered module.
    pub fn generated(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Generated)
    }

    /// A copied extra module.
    pub fn extra(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Extra)
    }

    /// A barrel file.
    pub fn barrel(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Barrel)
    }

    /// Create from a GeneratedFile, respecting its rules.
    pub fn from_generated<F: GeneratedFile>(
        path: impl Into<PathBuf>,
        file: &F,
        category: FileCategory,
    ) -> Self {
        Self::new(path, file.render(), category).with_overwrite(file.rules().overwrite)
    }

    /// Override the default overwrite behavior.
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    /// Get the effective overwrite behavior.
    pub fn overwrite(&self) -> Overwrite {
        self.overwrite
            .unwrap_or_else(|| self.category.default_overwrite())
    }

    /// Get the full path for this entry.
    pub fn full_path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    /// Write this file below `base`.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        File::new(self.full_path(base), self.content.as_str())
            .with_rules(FileRules {
                overwrite: self.overwrite(),
            })
            .write()
    }
}

/// Registry for collecting the files of a run.
///
/// Files are written in category order (Config -> Generated -> Extra ->
/// Barrel); within a category, registration order is kept.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file entry.
    pub fn register(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    /// Get all registered entries, sorted by category.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.category);
        sorted.into_iter()
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Preview all files without writing them.
    pub fn preview(&self) -> Vec<PreviewEntry> {
        self.entries()
            .map(|e| PreviewEntry {
                path: e.path.clone(),
                content: e.content.clone(),
                category: e.category,
            })
            .collect()
    }

    /// Write all files below `base`, in category order.
    pub fn write_all(&self, base: &Path) -> Result<WriteStats> {
        let mut stats = WriteStats::default();

        for entry in self.entries() {
            match entry.write(base)? {
                WriteResult::Written => stats.written += 1,
                WriteResult::Skipped => stats.skipped.push(entry.path.clone()),
            }
        }

        Ok(stats)
    }
}

/// A preview entry for displaying what would be generated.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewEntry {
    pub path: PathBuf,
    pub content: String,
    pub category: FileCategory,
}

/// Statistics from a write operation.
#[derive(Debug, Default)]
pub struct WriteStats {
    /// Number of files written.
    pub written: usize,
    /// Files left alone because they already existed.
    pub skipped: Vec<PathBuf>,
}

impl WriteStats {
    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.written + self.skipped.len()
    }
}
