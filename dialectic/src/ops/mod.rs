//! Core operations.
//!
//! This module contains the business logic for dialectic commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod clean;
pub mod generate;
pub mod list;

pub use check::check;
pub use clean::clean;
pub use generate::generate;
pub use list::list;

use dialectic_codegen::pipeline::Diagnostic;

/// One-line rendering of a diagnostic, with its location when known.
pub(crate) fn describe(diagnostic: &Diagnostic) -> String {
    match &diagnostic.location {
        Some(loc) => format!("{}\n  --> {}", diagnostic.message, loc),
        None => diagnostic.message.clone(),
    }
}
