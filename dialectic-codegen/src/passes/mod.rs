//! Built-in pipeline passes.

mod directives;
mod identifiers;
mod replace;
mod snippet;
mod type_params;
mod verify;

pub use directives::{
    DirectivesPass, fold_literals, resolve_directives, resolve_lines, substitute_placeholder,
};
pub use identifiers::{IdentifiersPass, add_session_params, rewrite_identifiers};
pub use replace::ReplacePass;
pub use snippet::{Hole, Segment, SnippetPass, fill_snippets, parse_snippets, snippet_keys};
pub use type_params::{InjectedSites, TypeParamsPass, inject_type_params};
pub use verify::{VerifyPass, find_residue};
