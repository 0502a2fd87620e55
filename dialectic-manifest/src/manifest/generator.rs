use std::path::PathBuf;

use serde::Deserialize;

use super::Dialect;

/// `[generator]` section: inputs, outputs and run-wide settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding the canonical templates.
    #[serde(default = "default_templates")]
    pub templates: PathBuf,

    /// Output root; each dialect gets its own subdirectory.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// The dialect templates are written in.
    #[serde(default = "default_reference")]
    pub reference: Dialect,

    /// Token compared against dialect literals (`DIALECT === 'pg'`).
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Template file extensions, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Emit a `tsconfig.json` stub into each dialect directory.
    #[serde(default = "default_true")]
    pub tsconfig: bool,

    /// Config the stub extends, relative to the dialect directory.
    #[serde(default = "default_tsconfig_extends")]
    pub tsconfig_extends: String,

    /// Subdirectory of each dialect directory receiving extra modules.
    #[serde(default = "default_extras_target")]
    pub extras_target: PathBuf,

    /// File name of the barrel listing the extra modules.
    #[serde(default = "default_barrel")]
    pub barrel: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            templates: default_templates(),
            output: default_output(),
            reference: default_reference(),
            placeholder: default_placeholder(),
            extensions: default_extensions(),
            tsconfig: true,
            tsconfig_extends: default_tsconfig_extends(),
            extras_target: default_extras_target(),
            barrel: default_barrel(),
        }
    }
}

fn default_templates() -> PathBuf {
    PathBuf::from("src/dialect")
}

fn default_output() -> PathBuf {
    PathBuf::from("src")
}

fn default_reference() -> Dialect {
    Dialect::Pg
}

fn default_placeholder() -> String {
    "DIALECT".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["ts".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_tsconfig_extends() -> String {
    "../../tsconfig.json".to_string()
}

fn default_extras_target() -> PathBuf {
    PathBuf::from("functions")
}

fn default_barrel() -> String {
    "index.ts".to_string()
}

/// `[types]` section: canonical type names the type-parameter and session
/// rules look for, spelled in the reference dialect's vocabulary.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeNames {
    /// Generic builder type whose parameter list grows per dialect.
    #[serde(default = "default_builder")]
    pub builder: String,

    /// Query-result types that take the extra parameters as arguments.
    #[serde(default = "default_queries")]
    pub queries: Vec<String>,

    /// Session types that receive `session_params` at annotations.
    #[serde(default = "default_sessions")]
    pub sessions: Vec<String>,
}

impl Default for TypeNames {
    fn default() -> Self {
        Self {
            builder: default_builder(),
            queries: default_queries(),
            sessions: default_sessions(),
        }
    }
}

fn default_builder() -> String {
    "RelationalQueryBuilder".to_string()
}

fn default_queries() -> Vec<String> {
    vec!["PgRelationalQuery".to_string()]
}

fn default_sessions() -> Vec<String> {
    vec!["PgSession".to_string()]
}

/// A `[[replacers]]` entry: a regex rewrite scoped to one template.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplacerConfig {
    /// Template (file stem) the rewrite applies to.
    pub template: String,

    /// Restrict to these dialects; all variants when absent.
    pub dialects: Option<Vec<Dialect>>,

    /// Regex to search for.
    pub pattern: String,

    /// Replacement, with `$1`/`${name}` capture references.
    pub replacement: String,

    /// Fail the pair when the pattern matches nothing.
    #[serde(default)]
    pub required: bool,
}

impl ReplacerConfig {
    /// Whether this entry applies to `dialect`.
    pub fn applies_to(&self, dialect: Dialect) -> bool {
        self.dialects
            .as_ref()
            .is_none_or(|dialects| dialects.contains(&dialect))
    }
}
