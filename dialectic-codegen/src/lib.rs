// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Template transformation and generation for the dialectic generator.
//!
//! One canonical template per feature, written in the reference dialect's
//! vocabulary, is turned into one module per SQL dialect.
//!
//! # Module Organization
//!
//! - [`pipeline`] - Ordered pass pipeline, plugins and diagnostics
//! - [`passes`] - The built-in passes (replace, directives, type params, identifiers, snippets, verify)
//! - [`replacer`] - Per-template custom replacers
//! - [`gate`] - Per-dialect unsupported templates
//! - [`lints`] - Configuration lints
//! - [`generation`] - File registry, barrels and project stubs
//! - [`testing`] - Test utilities (feature-gated)

mod error;
pub mod gate;
pub mod generation;
mod generator;
pub mod lints;
pub mod passes;
pub mod pipeline;
pub mod replacer;
mod template;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{Error, Failure, TemplateError};
pub use gate::FeatureGate;
pub use generator::{
    Availability, GenerateOptions, GenerateOutcome, GeneratedModule, Generator, MatrixRow,
    Rendered,
};
pub use pipeline::{Pipeline, SnapshotPlugin};
pub use replacer::ReplacerRegistry;
pub use template::{Template, list_files, load_templates};
