// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Parsing and validation of `dialectic.toml`.
//!
//! The manifest describes where templates live, where generated modules go,
//! and how each SQL dialect differs from the reference dialect. Every dialect
//! resolves to a single [`DialectProfile`] record combining built-in defaults
//! with manifest overrides.

mod error;
mod manifest;

pub use error::{Error, Result};
pub use manifest::{
    Dialect, DialectOverrides, DialectProfile, DialecticToml, GeneratorConfig, Manifest,
    ParseContext, ReplacerConfig, TypeNames, TypeParams,
};
