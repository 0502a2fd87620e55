//! Core utilities and types for the dialectic generator.
//!
//! This crate provides the file-writing primitives and the line-oriented
//! text helpers shared by the transformation passes.

mod file;
mod text;

// File operations
pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult, remove_dir_if_exists};
// Text utilities
pub use text::{
    dedent, indentation, reindent, split_lines_inclusive, split_top_level, strip_constraints,
};
