//! Manifest types and parsing for dialectic.toml files.

mod dialect;
mod file;
mod generator;
mod parse;
mod profile;
mod validate;

pub use dialect::Dialect;
pub use file::DialecticToml;
pub use generator::{GeneratorConfig, ReplacerConfig, TypeNames};
use indexmap::IndexMap;
pub use profile::{DialectOverrides, DialectProfile, TypeParams};
use serde::Deserialize;
pub use validate::ParseContext;

/// Root manifest for dialectic.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Run-wide settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Canonical type names used by the type-parameter rules
    #[serde(default)]
    pub types: TypeNames,

    /// Per-dialect overrides of the built-in profiles
    #[serde(default)]
    pub dialects: IndexMap<Dialect, DialectOverrides>,

    /// Pattern replacers scoped to single templates
    #[serde(default)]
    pub replacers: Vec<ReplacerConfig>,
}

impl Manifest {
    /// The reference dialect.
    pub fn reference(&self) -> Dialect {
        self.generator.reference
    }

    /// Resolve the complete profile for `dialect`.
    pub fn profile(&self, dialect: Dialect) -> DialectProfile {
        let profile = dialect.profile();
        match self.dialects.get(&dialect) {
            Some(overrides) => profile.merge(overrides),
            None => profile,
        }
    }

    /// Profiles for every dialect, in generation order.
    pub fn profiles(&self) -> Vec<DialectProfile> {
        Dialect::ALL.into_iter().map(|d| self.profile(d)).collect()
    }

    /// Dialects other than the reference, in generation order.
    pub fn variants(&self) -> impl Iterator<Item = Dialect> + '_ {
        Dialect::ALL
            .into_iter()
            .filter(move |d| *d != self.reference())
    }
}
