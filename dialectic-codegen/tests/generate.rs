//! End-to-end generation runs against a project on disk.

use std::{fs, path::Path, sync::Arc};

use dialectic_codegen::{
    Error, GenerateOptions, Generator, SnapshotPlugin, pipeline::Severity,
};
use dialectic_manifest::{Dialect, DialecticToml};
use tempfile::TempDir;

const MANIFEST: &str = r#"
[generator]
templates = "templates"
output = "out"

[dialects.mysql]
unsupported = ["upsert", "ghost"]
"#;

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    write(temp.path(), "dialectic.toml", MANIFEST);
    write(
        temp.path(),
        "templates/cursor.ts",
        "import { PgColumn } from 'drizzle-orm/pg-core'\n// sqlite-remove-next-line\nconst nulls = 'last'\n",
    );
    write(
        temp.path(),
        "templates/upsert.ts",
        "import { PgInsertBuilder } from 'drizzle-orm/pg-core'\n",
    );
    temp
}

fn open(root: &Path) -> Generator {
    let toml = DialecticToml::open(root.join("dialectic.toml")).expect("Failed to open manifest");
    Generator::from_toml(&toml).expect("Failed to create generator")
}

#[test]
fn test_gated_template_has_no_output() {
    let temp = project();
    open(temp.path())
        .generate(&GenerateOptions::default())
        .unwrap();

    let out = temp.path().join("out");
    assert!(out.join("pg/upsert.ts").exists());
    assert!(out.join("sqlite/upsert.ts").exists());
    assert!(!out.join("mysql/upsert.ts").exists());
    assert!(out.join("mysql/cursor.ts").exists());
}

#[test]
fn test_variants_and_reference() {
    let temp = project();
    open(temp.path())
        .generate(&GenerateOptions::default())
        .unwrap();

    let out = temp.path().join("out");
    let read = |path: &str| fs::read_to_string(out.join(path)).unwrap();

    assert_eq!(
        read("pg/cursor.ts"),
        fs::read_to_string(temp.path().join("templates/cursor.ts")).unwrap()
    );
    assert_eq!(
        read("sqlite/cursor.ts"),
        "import { SQLiteColumn } from 'drizzle-orm/sqlite-core'\n"
    );
    assert_eq!(
        read("mysql/cursor.ts"),
        "import { MySqlColumn } from 'drizzle-orm/mysql-core'\nconst nulls = 'last'\n"
    );
}

#[test]
fn test_selected_dialects_only() {
    let temp = project();
    let options = GenerateOptions {
        dialects: vec![Dialect::Sqlite],
        ..Default::default()
    };
    open(temp.path()).generate(&options).unwrap();

    let out = temp.path().join("out");
    assert!(out.join("sqlite/cursor.ts").exists());
    assert!(!out.join("pg").exists());
    assert!(!out.join("mysql").exists());
}

#[test]
fn test_failures_are_reported_together() {
    let temp = project();
    write(temp.path(), "templates/broken.ts", "// @end then\n");
    write(temp.path(), "templates/dangling.ts", "x\n// mysql-remove-next-line\n");

    let err = open(temp.path())
        .generate(&GenerateOptions::default())
        .unwrap_err();

    let Some(Error::GenerationFailed { failures }) = err.downcast_ref::<Error>() else {
        panic!("unexpected error: {err:?}");
    };
    let pairs: Vec<_> = failures
        .iter()
        .map(|f| (f.template.as_str(), f.dialect.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("broken", "mysql"),
            ("dangling", "mysql"),
            ("broken", "sqlite"),
            ("dangling", "sqlite"),
        ]
    );
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_snapshot_plugin_writes_every_pass() {
    let temp = project();
    let snapshots_dir = temp.path().join("snapshots");
    let plugin = Arc::new(SnapshotPlugin::with_output_dir(&snapshots_dir));

    open(temp.path())
        .with_plugin(plugin.clone())
        .generate(&GenerateOptions::default())
        .unwrap();

    // cursor for mysql and sqlite, upsert for sqlite
    assert_eq!(plugin.snapshots().len(), 3 * 6);
    assert!(snapshots_dir.join("sqlite/cursor/02-directives.json").exists());
    assert!(snapshots_dir.join("mysql/cursor/06-verify.json").exists());
    assert!(!snapshots_dir.join("pg").exists());
}

#[test]
fn test_lint_reports_unknown_gate_entry() {
    let temp = project();
    let generator = open(temp.path());
    let templates = generator.load_templates().unwrap();

    let warnings: Vec<_> = generator
        .lint(&templates)
        .into_iter()
        .filter(|d| d.severity == Severity::Warning)
        .map(|d| d.message)
        .collect();
    assert_eq!(warnings, vec!["'ghost' is gated but no such template exists"]);
}
