//! Pipeline snapshot plugin for debugging passes.
//!
//! This module provides a plugin that captures the text after each pass,
//! so the effect of every pass on every pair can be inspected.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use eyre::{Context, Result, eyre};
use serde::Serialize;

use super::{Diagnostic, Plugin, RenderContext};

/// The text of one pair right after a pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassSnapshot {
    /// Template name.
    pub template: String,
    /// Dialect being generated.
    pub dialect: String,
    /// The pass that just completed.
    pub pass: String,
    /// The text after the pass.
    pub text: String,
    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PassSnapshot {
    /// Relative path of this snapshot: `<dialect>/<template>/<NN>-<pass>.json`.
    pub fn relative_path(&self, ordinal: usize) -> PathBuf {
        PathBuf::from(&self.dialect)
            .join(&self.template)
            .join(format!("{:02}-{}.json", ordinal, self.pass))
    }
}

/// A plugin that captures the text after each pass.
///
/// Used by `dialectic generate --snapshot-dir`.
///
/// # Example
///
/// ```ignore
/// let snapshots = Arc::new(SnapshotPlugin::new());
/// let pipeline = Pipeline::new(replacers).plugin(snapshots.clone());
/// pipeline.run(&mut ctx)?;
///
/// snapshots.write_to_dir(".dialectic/snapshots")?;
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots, with the ordinal of the pass that produced them.
    snapshots: RwLock<Vec<(usize, PassSnapshot)>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that writes to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PassSnapshot> {
        let guard = self
            .snapshots
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.iter().map(|(_, s)| s.clone()).collect()
    }

    /// Record the text of `ctx` after `pass`.
    ///
    /// Returns the snapshot and its 1-based position among the snapshots of
    /// the same pair.
    fn capture_snapshot(
        &self,
        pass: &str,
        ctx: &RenderContext<'_>,
    ) -> Result<(usize, PassSnapshot)> {
        let snapshot = PassSnapshot {
            template: ctx.template.name.clone(),
            dialect: ctx.dialect().to_string(),
            pass: pass.to_string(),
            text: ctx.text.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };

        let mut guard = self
            .snapshots
            .write()
            .map_err(|_| eyre!("snapshot store poisoned"))?;
        let ordinal = 1 + guard
            .iter()
            .filter(|(_, s)| s.template == snapshot.template && s.dialect == snapshot.dialect)
            .count();
        guard.push((ordinal, snapshot.clone()));

        Ok((ordinal, snapshot))
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_pass(&self, pass: &str, ctx: &mut RenderContext<'_>) -> Result<()> {
        let (ordinal, snapshot) = self.capture_snapshot(pass, ctx)?;

        // If output directory is configured, write immediately
        if let Some(ref dir) = self.output_dir {
            write_snapshot(dir, ordinal, &snapshot)?;
        }

        Ok(())
    }
}

fn write_snapshot(dir: &Path, ordinal: usize, snapshot: &PassSnapshot) -> Result<()> {
    let path = dir.join(snapshot.relative_path(ordinal));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}
