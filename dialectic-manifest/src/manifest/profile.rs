//! Per-dialect configuration records.

use std::path::PathBuf;

use dialectic_core::{split_top_level, strip_constraints};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::Dialect;

/// Extra generic parameters a dialect's query builder carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeParams {
    /// Declaration form, e.g. `TMode extends 'sync' | 'async'`.
    pub code: String,
    /// Number of parameters `code` declares.
    pub slots: usize,
}

impl TypeParams {
    /// Build a descriptor, counting the declared parameters.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let slots = count_params(&code);
        Self { code, slots }
    }

    /// The parameter names alone, for use at type-argument sites.
    pub fn arguments(&self) -> String {
        strip_constraints(&self.code)
    }

    /// One `any` per slot, for sites that reference the builder loosely.
    pub fn permissive_arguments(&self) -> String {
        vec!["any"; self.slots].join(", ")
    }
}

/// Count the top-level parameters in a type-parameter list.
pub(crate) fn count_params(code: &str) -> usize {
    split_top_level(code, ',')
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .count()
}

/// Manifest overrides for one `[dialects.<name>]` table.
///
/// Every field is optional; unset fields fall back to [`Dialect::profile`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DialectOverrides {
    /// Module path prefix (`pg` in `drizzle-orm/pg-core`).
    pub module_prefix: Option<String>,
    /// Capitalized type-name prefix (`Pg` in `PgTable`).
    pub type_prefix: Option<String>,
    /// Extra type parameters injected into the builder type.
    pub type_params: Option<String>,
    /// Explicit slot count; must agree with `type_params`.
    pub type_param_slots: Option<usize>,
    /// Type arguments appended to session type annotations.
    pub session_params: Option<String>,
    /// Exact type renames applied before the prefix rules.
    #[serde(default)]
    pub renames: IndexMap<String, String>,
    /// Templates this dialect cannot support. Replaces the built-in list.
    pub unsupported: Option<Vec<String>>,
    /// Snippet overrides, keyed by `key` or `template.key`.
    #[serde(default)]
    pub snippets: IndexMap<String, String>,
    /// Directory of dialect-only modules copied into the output.
    pub extras: Option<PathBuf>,
}

impl DialectOverrides {
    /// Names of the fields that only make sense for variant dialects.
    pub(crate) fn variant_only_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.type_params.is_some() {
            fields.push("type_params");
        }
        if self.type_param_slots.is_some() {
            fields.push("type_param_slots");
        }
        if self.session_params.is_some() {
            fields.push("session_params");
        }
        if !self.renames.is_empty() {
            fields.push("renames");
        }
        if self.unsupported.as_ref().is_some_and(|u| !u.is_empty()) {
            fields.push("unsupported");
        }
        if !self.snippets.is_empty() {
            fields.push("snippets");
        }
        fields
    }
}

/// The complete configuration record for one dialect.
#[derive(Debug, Clone, Serialize)]
pub struct DialectProfile {
    pub dialect: Dialect,
    pub module_prefix: String,
    pub type_prefix: String,
    pub type_params: Option<TypeParams>,
    pub session_params: Option<String>,
    pub renames: IndexMap<String, String>,
    pub unsupported: IndexSet<String>,
    pub snippets: IndexMap<String, String>,
    pub extras: Option<PathBuf>,
}

impl DialectProfile {
    /// Whether the feature gate excludes `template` for this dialect.
    pub fn is_unsupported(&self, template: &str) -> bool {
        self.unsupported.contains(template)
    }

    /// Look up a snippet override, preferring `template.key` over `key`.
    pub fn snippet(&self, template: &str, key: &str) -> Option<&str> {
        self.snippets
            .get(&format!("{}.{}", template, key))
            .or_else(|| self.snippets.get(key))
            .map(String::as_str)
    }

    /// Apply manifest overrides on top of this profile.
    pub(crate) fn merge(mut self, overrides: &DialectOverrides) -> Self {
        if let Some(prefix) = &overrides.module_prefix {
            self.module_prefix = prefix.clone();
        }
        if let Some(prefix) = &overrides.type_prefix {
            self.type_prefix = prefix.clone();
        }
        if let Some(code) = &overrides.type_params {
            self.type_params = (!code.trim().is_empty()).then(|| TypeParams::new(code.trim()));
        }
        if let Some(params) = &overrides.session_params {
            self.session_params = (!params.trim().is_empty()).then(|| params.trim().to_string());
        }
        self.renames.extend(overrides.renames.clone());
        if let Some(unsupported) = &overrides.unsupported {
            self.unsupported = unsupported.iter().cloned().collect();
        }
        self.snippets.extend(overrides.snippets.clone());
        if let Some(extras) = &overrides.extras {
            self.extras = Some(extras.clone());
        }
        self
    }
}

impl Dialect {
    /// Built-in profile for this dialect.
    pub fn profile(self) -> DialectProfile {
        let (module_prefix, type_prefix, type_params, session_params, unsupported) = match self {
            Dialect::Pg => ("pg", "Pg", None, None, &[][..]),
            Dialect::Mysql => (
                "mysql",
                "MySql",
                Some("TPreparedQueryHKT extends import('drizzle-orm/mysql-core').PreparedQueryHKTBase"),
                Some("any, any"),
                &["upsert", "$withMaterialized"][..],
            ),
            Dialect::Sqlite => (
                "sqlite",
                "SQLite",
                Some("TMode extends 'sync' | 'async'"),
                Some("'sync' | 'async', any"),
                &[][..],
            ),
        };

        DialectProfile {
            dialect: self,
            module_prefix: module_prefix.to_string(),
            type_prefix: type_prefix.to_string(),
            type_params: type_params.map(TypeParams::new),
            session_params: session_params.map(str::to_string),
            renames: IndexMap::new(),
            unsupported: unsupported.iter().map(|s| s.to_string()).collect(),
            snippets: IndexMap::new(),
            extras: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_params_slots() {
        assert_eq!(TypeParams::new("TMode extends 'sync' | 'async'").slots, 1);
        assert_eq!(
            TypeParams::new("TResultType extends 'sync' | 'async', TRunResult").slots,
            2
        );
        assert_eq!(
            TypeParams::new("T extends Record<string, unknown>").slots,
            1
        );
    }

    #[test]
    fn test_type_params_arguments() {
        let params = TypeParams::new("TResultType extends 'sync' | 'async', TRunResult");
        assert_eq!(params.arguments(), "TResultType, TRunResult");
        assert_eq!(params.permissive_arguments(), "any, any");
    }

    #[test]
    fn test_builtin_profiles() {
        let pg = Dialect::Pg.profile();
        assert_eq!(pg.type_prefix, "Pg");
        assert!(pg.type_params.is_none());

        let mysql = Dialect::Mysql.profile();
        assert!(mysql.is_unsupported("upsert"));
        assert!(!mysql.is_unsupported("count"));

        let sqlite = Dialect::Sqlite.profile();
        assert_eq!(sqlite.type_prefix, "SQLite");
        assert_eq!(sqlite.type_params.unwrap().slots, 1);
    }

    #[test]
    fn test_merge_overrides() {
        let overrides = DialectOverrides {
            type_prefix: Some("Lite".to_string()),
            unsupported: Some(vec!["cursor".to_string()]),
            snippets: IndexMap::from([("then".to_string(), "then() {}".to_string())]),
            ..Default::default()
        };

        let profile = Dialect::Sqlite.profile().merge(&overrides);

        assert_eq!(profile.type_prefix, "Lite");
        assert_eq!(profile.module_prefix, "sqlite");
        assert!(profile.is_unsupported("cursor"));
        assert_eq!(profile.snippet("count", "then"), Some("then() {}"));
    }

    #[test]
    fn test_empty_type_params_clears_default() {
        let overrides = DialectOverrides {
            type_params: Some(String::new()),
            ..Default::default()
        };
        assert!(Dialect::Mysql.profile().merge(&overrides).type_params.is_none());
    }

    #[test]
    fn test_snippet_lookup_prefers_template_key() {
        let mut profile = Dialect::Sqlite.profile();
        profile.snippets.insert("then".to_string(), "generic".to_string());
        profile
            .snippets
            .insert("count.then".to_string(), "specific".to_string());

        assert_eq!(profile.snippet("count", "then"), Some("specific"));
        assert_eq!(profile.snippet("cursor", "then"), Some("generic"));
        assert_eq!(profile.snippet("cursor", "toSQL"), None);
    }
}
