//! Rendering pipeline for (template, dialect) pairs.
//!
//! This module provides a [`Pipeline`] that runs an ordered list of passes over
//! a template's text. The pipeline provides:
//!
//! - Explicit pass ordering via [`Stage`] (replace → directives → type params →
//!   identifiers → snippets → verify)
//! - Plugin hooks for extensibility (before/after each pass)
//! - Diagnostics collection per pair
//!
//! # Example
//!
//! ```ignore
//! use dialectic_codegen::pipeline::{Pipeline, RenderContext};
//!
//! let pipeline = Pipeline::new(replacers);
//! let mut ctx = RenderContext::new(&template, &profile, &reference, &manifest);
//! pipeline.run(&mut ctx)?;
//!
//! std::fs::write(path, &ctx.text)?;
//! ```

mod context;
mod diagnostic;
mod pass;
mod plugin;
mod runner;
mod snapshot;

pub use context::RenderContext;
pub use diagnostic::{Diagnostic, Severity};
pub use pass::{Pass, PassInfo, Stage};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PassSnapshot, SnapshotPlugin};
