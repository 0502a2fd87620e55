//! The generation driver: templates × dialects → output tree.

use std::{path::PathBuf, sync::Arc};

use dialectic_core::remove_dir_if_exists;
use dialectic_manifest::{Dialect, DialectProfile, DialecticToml, Manifest};
use eyre::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    Error, Failure, Template, TemplateError,
    gate::FeatureGate,
    generation::{
        Barrel, FileCategory, FileEntry, FileRegistry, PreviewEntry, TsConfigStub, WriteStats,
    },
    lints::{LintContext, Linter},
    pipeline::{Diagnostic, Pipeline, Plugin, RenderContext},
    replacer::ReplacerRegistry,
    template::{list_files, load_templates},
};

/// Output for one (template, dialect) pair.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedModule {
    pub template: String,
    pub dialect: Dialect,
    /// Path relative to the output root: `<dialect>/<file_name>`.
    pub path: PathBuf,
    pub content: String,
}

/// Everything produced by rendering a set of pairs in memory.
#[derive(Debug, Default)]
pub struct Rendered {
    pub modules: Vec<GeneratedModule>,
    /// Pairs skipped by the feature gate.
    pub gated: Vec<(String, Dialect)>,
    pub failures: Vec<Failure>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    /// Number of modules rendered for `dialect`.
    pub fn module_count(&self, dialect: Dialect) -> usize {
        self.modules.iter().filter(|m| m.dialect == dialect).count()
    }

    /// Number of pairs gated for `dialect`.
    pub fn gated_count(&self, dialect: Dialect) -> usize {
        self.gated.iter().filter(|(_, d)| *d == dialect).count()
    }
}

/// Options for [`Generator::generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Dialects to generate; empty means all of them.
    pub dialects: Vec<Dialect>,
    /// Keep existing dialect directories instead of clearing them.
    pub keep_existing: bool,
    /// Compute the files without touching the disk.
    pub dry_run: bool,
}

impl GenerateOptions {
    /// The selected dialects in generation order.
    pub fn selected(&self) -> Vec<Dialect> {
        Dialect::ALL
            .into_iter()
            .filter(|d| self.dialects.is_empty() || self.dialects.contains(d))
            .collect()
    }
}

/// What a generation run did (or would do, for a dry run).
#[derive(Debug, Default)]
pub struct GenerateOutcome {
    pub dry_run: bool,
    /// Every planned file, in write order.
    pub files: Vec<PreviewEntry>,
    pub gated: Vec<(String, Dialect)>,
    /// Dialect directories that were (or would be) cleared.
    pub cleared: Vec<PathBuf>,
    /// Empty for a dry run.
    pub stats: WriteStats,
    pub diagnostics: Vec<Diagnostic>,
}

/// How a template is handled for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// Copied verbatim.
    Reference,
    /// Rendered through the pipeline.
    Generated,
    /// Excluded by the feature gate.
    Gated,
}

/// One row of `dialectic list`.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub template: String,
    pub dialects: Vec<(Dialect, Availability)>,
    pub replacers: Vec<String>,
}

/// Drives a generation run for one manifest.
pub struct Generator {
    manifest: Manifest,
    root: PathBuf,
    replacers: Arc<ReplacerRegistry>,
    gate: FeatureGate,
    pipeline: Pipeline,
}

impl Generator {
    /// Create a generator; relative manifest paths resolve against `root`.
    pub fn new(manifest: Manifest, root: impl Into<PathBuf>) -> Result<Self> {
        let replacers = Arc::new(ReplacerRegistry::from_manifest(&manifest)?);
        let gate = FeatureGate::from_manifest(&manifest);
        let pipeline = Pipeline::new(replacers.clone());
        Ok(Self {
            manifest,
            root: root.into(),
            replacers,
            gate,
            pipeline,
        })
    }

    /// Create a generator for an opened `dialectic.toml`.
    pub fn from_toml(toml: &DialecticToml) -> Result<Self> {
        Self::new(toml.manifest().clone(), toml.root())
    }

    /// Attach a plugin to the pipeline.
    pub fn with_plugin(self, plugin: impl Plugin + 'static) -> Self {
        Self {
            pipeline: self.pipeline.plugin(plugin),
            ..self
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(&self.manifest.generator.templates)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.manifest.generator.output)
    }

    /// Load the templates, sorted by file name.
    pub fn load_templates(&self) -> Result<Vec<Template>> {
        load_templates(&self.templates_dir(), &self.manifest.generator.extensions)
    }

    /// Render one pair. The reference dialect is passed through unmodified.
    pub fn render_pair(
        &self,
        template: &Template,
        profile: &DialectProfile,
        reference: &DialectProfile,
    ) -> Result<(String, Vec<Diagnostic>)> {
        if profile.dialect == reference.dialect {
            return Ok((template.source.clone(), Vec::new()));
        }

        let mut ctx = RenderContext::new(template, profile, reference, &self.manifest);
        self.pipeline.run(&mut ctx)?;
        Ok((ctx.text, ctx.diagnostics))
    }

    /// Render every pair in memory. Failures are collected, not raised.
    pub fn render(&self, templates: &[Template], dialects: &[Dialect]) -> Rendered {
        let reference = self.manifest.profile(self.manifest.reference());
        let mut rendered = Rendered::default();

        for &dialect in dialects {
            let profile = self.manifest.profile(dialect);

            for template in templates {
                if !self.gate.allows(&template.name, dialect) {
                    debug!(template = %template.name, dialect = %dialect, "gated");
                    rendered.gated.push((template.name.clone(), dialect));
                    continue;
                }

                match self.render_pair(template, &profile, &reference) {
                    Ok((content, diagnostics)) => {
                        rendered.diagnostics.extend(diagnostics);
                        rendered.modules.push(GeneratedModule {
                            template: template.name.clone(),
                            dialect,
                            path: PathBuf::from(dialect.as_str()).join(&template.file_name),
                            content,
                        });
                    }
                    Err(e) => rendered.failures.push(Failure {
                        template: template.name.clone(),
                        dialect: dialect.to_string(),
                        message: failure_message(&template.name, &e),
                    }),
                }
            }
        }

        rendered
    }

    /// Register every file of a run: stubs, modules, extras and barrels.
    ///
    /// Reads extra modules and, with `keep_existing`, the current barrels, so
    /// it must run before any directory is cleared.
    pub fn plan(
        &self,
        rendered: &Rendered,
        dialects: &[Dialect],
        keep_existing: bool,
    ) -> Result<FileRegistry> {
        let config = &self.manifest.generator;
        let mut registry = FileRegistry::new();

        for &dialect in dialects {
            let dir = PathBuf::from(dialect.as_str());

            if config.tsconfig {
                let stub = TsConfigStub::new(&config.tsconfig_extends);
                registry.register(FileEntry::from_generated(
                    dir.join("tsconfig.json"),
                    &stub,
                    FileCategory::Config,
                ));
            }

            for module in rendered.modules.iter().filter(|m| m.dialect == dialect) {
                self.gate.ensure_allowed(&module.template, dialect)?;
                registry.register(FileEntry::generated(&module.path, module.content.as_str()));
            }

            let profile = self.manifest.profile(dialect);
            if let Some(extras) = &profile.extras {
                let target = dir.join(&config.extras_target);
                let barrel_path = target.join(&config.barrel);
                let mut barrel = if keep_existing {
                    Barrel::load(&self.output_dir().join(&barrel_path))?
                } else {
                    Barrel::new()
                };

                for path in list_files(&self.root.join(extras), &config.extensions)? {
                    let extra = Template::read(&path)?;
                    if extra.file_name == config.barrel {
                        continue;
                    }
                    registry.register(FileEntry::extra(
                        target.join(&extra.file_name),
                        extra.source,
                    ));
                    barrel.append(&extra.name);
                }

                registry.register(FileEntry::barrel(barrel_path, barrel.render()));
            }
        }

        Ok(registry)
    }

    /// Run a full generation.
    ///
    /// All pairs are rendered first; if any fails, nothing is written and
    /// [`Error::GenerationFailed`] lists every failure.
    pub fn generate(&self, options: &GenerateOptions) -> Result<GenerateOutcome> {
        let templates = self.load_templates()?;
        let dialects = options.selected();

        let rendered = self.render(&templates, &dialects);
        if !rendered.failures.is_empty() {
            return Err(Error::GenerationFailed {
                failures: rendered.failures,
            }
            .into());
        }

        let registry = self.plan(&rendered, &dialects, options.keep_existing)?;
        let output = self.output_dir();

        let mut outcome = GenerateOutcome {
            dry_run: options.dry_run,
            files: registry.preview(),
            gated: rendered.gated.clone(),
            diagnostics: rendered.diagnostics.clone(),
            ..Default::default()
        };

        if options.dry_run {
            if !options.keep_existing {
                outcome.cleared = dialects
                    .iter()
                    .map(|d| output.join(d.as_str()))
                    .filter(|p| p.exists())
                    .collect();
            }
            return Ok(outcome);
        }

        for dialect in &dialects {
            let dir = output.join(dialect.as_str());
            if !options.keep_existing && remove_dir_if_exists(&dir)? {
                outcome.cleared.push(dir.clone());
            }
            std::fs::create_dir_all(&dir)
                .wrap_err_with(|| format!("failed to create '{}'", dir.display()))?;
        }

        outcome.stats = registry.write_all(&output)?;

        for &dialect in &dialects {
            info!(
                dialect = %dialect,
                modules = rendered.module_count(dialect),
                gated = rendered.gated_count(dialect),
                "dialect generated"
            );
        }

        Ok(outcome)
    }

    /// Remove the output directory of each dialect.
    ///
    /// Returns the directories that were (or, for a dry run, would be)
    /// removed.
    pub fn clean(&self, dialects: &[Dialect], dry_run: bool) -> Result<Vec<PathBuf>> {
        let output = self.output_dir();
        let mut removed = Vec::new();

        for dialect in dialects {
            let dir = output.join(dialect.as_str());
            let gone = if dry_run {
                dir.exists()
            } else {
                remove_dir_if_exists(&dir)?
            };
            if gone {
                removed.push(dir);
            }
        }

        Ok(removed)
    }

    /// How each template is handled per dialect.
    pub fn matrix(&self, templates: &[Template]) -> Vec<MatrixRow> {
        let reference = self.manifest.reference();
        templates
            .iter()
            .map(|template| MatrixRow {
                template: template.name.clone(),
                dialects: Dialect::ALL
                    .into_iter()
                    .map(|dialect| {
                        let availability = if !self.gate.allows(&template.name, dialect) {
                            Availability::Gated
                        } else if dialect == reference {
                            Availability::Reference
                        } else {
                            Availability::Generated
                        };
                        (dialect, availability)
                    })
                    .collect(),
                replacers: self
                    .replacers
                    .names(&template.name)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
            .collect()
    }

    /// Run the built-in lints.
    pub fn lint(&self, templates: &[Template]) -> Vec<Diagnostic> {
        let ctx = LintContext {
            manifest: &self.manifest,
            templates,
            replacers: &self.replacers,
        };
        Linter::new().run(&ctx)
    }
}

/// Failure text for a pair. Template errors already name the template.
fn failure_message(template: &str, error: &eyre::Report) -> String {
    match error.downcast_ref::<TemplateError>() {
        Some(e) => e.to_string(),
        None => format!("{}: {:#}", template, error),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::testing::{Fixture, assert_content_eq};

    fn generator(toml: &str) -> Generator {
        Generator::new(Manifest::from_str(toml).unwrap(), ".").unwrap()
    }

    #[test]
    fn test_reference_is_verbatim() {
        let generator = generator("");
        let template = Template::new("count.ts", "// mysql-insert: x\nPgTable\n");
        let rendered = generator.render(std::slice::from_ref(&template), &[Dialect::Pg]);

        assert_eq!(rendered.modules[0].content, template.source);
        assert_eq!(rendered.modules[0].path, PathBuf::from("pg/count.ts"));
    }

    #[test]
    fn test_gated_pairs_are_skipped() {
        let generator = generator("");
        let templates = vec![Template::new("upsert.ts", "PgTable\n")];
        let rendered = generator.render(&templates, &Dialect::ALL);

        let dialects: Vec<_> = rendered.modules.iter().map(|m| m.dialect).collect();
        assert_eq!(dialects, vec![Dialect::Pg, Dialect::Sqlite]);
        assert_eq!(rendered.gated, vec![("upsert".to_string(), Dialect::Mysql)]);
    }

    #[test]
    fn test_failures_are_isolated_per_pair() {
        let generator = generator("");
        let templates = vec![
            Template::new("broken.ts", "// @start then\n"),
            Template::new("count2.ts", "PgTable\n"),
        ];
        let rendered = generator.render(&templates, &[Dialect::Mysql, Dialect::Sqlite]);

        assert_eq!(rendered.failures.len(), 2);
        assert_eq!(rendered.failures[0].dialect, "mysql");
        assert_eq!(
            rendered.failures[0].message,
            "broken:1: snippet 'then' is opened but never closed"
        );
        assert_eq!(rendered.modules.len(), 2);
    }

    #[test]
    fn test_plan_refuses_gated_module() {
        let generator = generator("");
        let rendered = Rendered {
            modules: vec![GeneratedModule {
                template: "upsert".to_string(),
                dialect: Dialect::Mysql,
                path: PathBuf::from("mysql/upsert.ts"),
                content: String::new(),
            }],
            ..Default::default()
        };

        let err = generator
            .plan(&rendered, &[Dialect::Mysql], false)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::GatedWrite { .. })
        ));
    }

    #[test]
    fn test_selected_dialects_keep_generation_order() {
        let options = GenerateOptions {
            dialects: vec![Dialect::Sqlite, Dialect::Pg],
            ..Default::default()
        };
        assert_eq!(options.selected(), vec![Dialect::Pg, Dialect::Sqlite]);
        assert_eq!(GenerateOptions::default().selected(), Dialect::ALL.to_vec());
    }

    #[test]
    fn test_matrix() {
        let generator = generator("");
        let templates = vec![
            Template::new("count.ts", ""),
            Template::new("upsert.ts", ""),
        ];
        let matrix = generator.matrix(&templates);

        assert_eq!(matrix[0].replacers, vec!["count-decoding"]);
        assert_eq!(
            matrix[1].dialects,
            vec![
                (Dialect::Pg, Availability::Reference),
                (Dialect::Mysql, Availability::Gated),
                (Dialect::Sqlite, Availability::Generated),
            ]
        );
    }

    const MANIFEST: &str = r#"
        [generator]
        templates = "src/dialect"
        output = "src"

        [dialects.sqlite]
        extras = "extras/sqlite"
    "#;

    fn fixture() -> Fixture {
        Fixture::new(MANIFEST)
            .unwrap()
            .file(
                "src/dialect/table.ts",
                "import { PgTable } from 'drizzle-orm/pg-core'\n",
            )
            .unwrap()
            .file("src/dialect/upsert.ts", "export const upsert = 1\n")
            .unwrap()
            .file("extras/sqlite/instr.ts", "export const instr = 1\n")
            .unwrap()
            .file("extras/sqlite/concat.ts", "export const concat = 1\n")
            .unwrap()
    }

    #[test]
    fn test_generate_writes_tree() {
        let fixture = fixture();
        let outcome = fixture
            .generator()
            .unwrap()
            .generate(&GenerateOptions::default())
            .unwrap();

        let tree = fixture.tree("src").unwrap();
        let paths: Vec<_> = tree.keys().map(String::as_str).collect();
        assert_eq!(
            paths,
            vec![
                "dialect/table.ts",
                "dialect/upsert.ts",
                "mysql/table.ts",
                "mysql/tsconfig.json",
                "pg/table.ts",
                "pg/tsconfig.json",
                "pg/upsert.ts",
                "sqlite/functions/concat.ts",
                "sqlite/functions/index.ts",
                "sqlite/functions/instr.ts",
                "sqlite/table.ts",
                "sqlite/tsconfig.json",
                "sqlite/upsert.ts",
            ]
        );
        assert_content_eq(
            "import { SQLiteTable } from 'drizzle-orm/sqlite-core'\n",
            &tree["sqlite/table.ts"],
        );
        assert_content_eq(
            "export * from './concat'\nexport * from './instr'\n",
            &tree["sqlite/functions/index.ts"],
        );
        assert_eq!(outcome.gated, vec![("upsert".to_string(), Dialect::Mysql)]);
        assert_eq!(outcome.stats.written, 13 - 2);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let fixture = fixture();
        let generator = fixture.generator().unwrap();

        generator.generate(&GenerateOptions::default()).unwrap();
        let first = fixture.tree("src").unwrap();
        generator.generate(&GenerateOptions::default()).unwrap();
        let second = fixture.tree("src").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_clears_stale_modules() {
        let fixture = fixture().file("src/mysql/stale.ts", "old").unwrap();
        let outcome = fixture
            .generator()
            .unwrap()
            .generate(&GenerateOptions::default())
            .unwrap();

        assert!(!fixture.root().join("src/mysql/stale.ts").exists());
        assert_eq!(outcome.cleared, vec![fixture.root().join("src/mysql")]);
    }

    #[test]
    fn test_keep_existing_preserves_barrel_entries() {
        let fixture = fixture()
            .file(
                "src/sqlite/functions/index.ts",
                "export * from './instr'\nexport * from './legacy'\n",
            )
            .unwrap()
            .file("src/mysql/stale.ts", "old")
            .unwrap();
        let options = GenerateOptions {
            keep_existing: true,
            ..Default::default()
        };
        fixture.generator().unwrap().generate(&options).unwrap();

        let tree = fixture.tree("src").unwrap();
        assert_content_eq(
            "export * from './instr'\nexport * from './legacy'\nexport * from './concat'\n",
            &tree["sqlite/functions/index.ts"],
        );
        assert!(tree.contains_key("mysql/stale.ts"));
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let fixture = fixture();
        let options = GenerateOptions {
            dry_run: true,
            ..Default::default()
        };
        let outcome = fixture.generator().unwrap().generate(&options).unwrap();

        assert_eq!(outcome.files.len(), 13 - 2);
        assert_eq!(outcome.stats.total(), 0);
        assert!(!fixture.root().join("src/pg").exists());
    }

    #[test]
    fn test_failure_leaves_tree_untouched() {
        let fixture = fixture()
            .file("src/mysql/table.ts", "previous")
            .unwrap()
            .file("src/dialect/broken.ts", "// oracle-insert: x\n")
            .unwrap();

        let err = fixture
            .generator()
            .unwrap()
            .generate(&GenerateOptions::default())
            .unwrap_err();

        match err.downcast_ref::<Error>() {
            Some(Error::GenerationFailed { failures }) => {
                let dialects: Vec<_> = failures.iter().map(|f| f.dialect.as_str()).collect();
                assert_eq!(dialects, vec!["mysql", "sqlite"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let tree = fixture.tree("src").unwrap();
        assert_eq!(tree["mysql/table.ts"], "previous");
        assert!(!tree.contains_key("pg/table.ts"));
    }

    #[test]
    fn test_clean() {
        let fixture = fixture();
        let generator = fixture.generator().unwrap();
        generator.generate(&GenerateOptions::default()).unwrap();

        let preview = generator.clean(&[Dialect::Mysql], true).unwrap();
        assert_eq!(preview, vec![fixture.root().join("src/mysql")]);
        assert!(fixture.root().join("src/mysql").exists());

        let removed = generator.clean(&Dialect::ALL, false).unwrap();
        assert_eq!(removed.len(), 3);
        assert!(fixture.root().join("src/dialect/table.ts").exists());
        assert!(!fixture.root().join("src/sqlite").exists());
    }
}
