//! Feature gate: templates a dialect cannot offer.

use dialectic_manifest::{Dialect, Manifest};
use indexmap::{IndexMap, IndexSet};

use crate::Error;

/// Per-dialect sets of unsupported templates.
///
/// Checked before any pass runs; a gated pair produces no module and no
/// barrel entry.
#[derive(Debug, Clone, Default)]
pub struct FeatureGate {
    unsupported: IndexMap<Dialect, IndexSet<String>>,
}

impl FeatureGate {
    /// Collect the gate from every dialect profile of the manifest.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let unsupported = manifest
            .profiles()
            .into_iter()
            .map(|profile| (profile.dialect, profile.unsupported))
            .collect();
        Self { unsupported }
    }

    /// Whether `template` may be generated for `dialect`.
    pub fn allows(&self, template: &str, dialect: Dialect) -> bool {
        !self
            .unsupported
            .get(&dialect)
            .is_some_and(|set| set.contains(template))
    }

    /// Templates gated for `dialect`, in manifest order.
    pub fn gated(&self, dialect: Dialect) -> impl Iterator<Item = &str> {
        self.unsupported
            .get(&dialect)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Fail if a module for a gated pair is about to be written.
    pub fn ensure_allowed(&self, template: &str, dialect: Dialect) -> Result<(), Error> {
        if self.allows(template, dialect) {
            Ok(())
        } else {
            Err(Error::GatedWrite {
                template: template.to_string(),
                dialect: dialect.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_builtin_gate() {
        let gate = FeatureGate::from_manifest(&Manifest::default());

        assert!(!gate.allows("upsert", Dialect::Mysql));
        assert!(!gate.allows("$withMaterialized", Dialect::Mysql));
        assert!(gate.allows("upsert", Dialect::Sqlite));
        assert!(gate.allows("upsert", Dialect::Pg));
        assert_eq!(
            gate.gated(Dialect::Mysql).collect::<Vec<_>>(),
            vec!["upsert", "$withMaterialized"]
        );
    }

    #[test]
    fn test_manifest_replaces_builtin_list() {
        let manifest = Manifest::from_str(
            r#"
            [dialects.sqlite]
            unsupported = ["cursor"]

            [dialects.mysql]
            unsupported = []
            "#,
        )
        .unwrap();
        let gate = FeatureGate::from_manifest(&manifest);

        assert!(!gate.allows("cursor", Dialect::Sqlite));
        assert!(gate.allows("upsert", Dialect::Mysql));
        assert_eq!(gate.gated(Dialect::Mysql).count(), 0);
    }

    #[test]
    fn test_ensure_allowed() {
        let gate = FeatureGate::from_manifest(&Manifest::default());

        assert!(gate.ensure_allowed("count", Dialect::Mysql).is_ok());
        let err = gate.ensure_allowed("upsert", Dialect::Mysql).unwrap_err();
        assert!(matches!(err, Error::GatedWrite { .. }));
        assert!(err.to_string().contains("upsert"));
    }
}
