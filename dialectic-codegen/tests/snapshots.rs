//! Snapshot tests for rendered modules.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::str::FromStr;

use dialectic_codegen::{Generator, Template};
use dialectic_manifest::{Dialect, Manifest};

const COUNT: &str = r#"import { sql } from 'drizzle-orm'
import { PgDialect, PgSession, PgTable } from 'drizzle-orm/pg-core'
import { RelationalQueryBuilder } from 'drizzle-orm/pg-core/query-builders/query'

declare module 'drizzle-orm/pg-core/query-builders/query' {
  export interface RelationalQueryBuilder<
    TSchema extends TablesRelationalConfig,
    TFields extends TableRelationalConfig,
  > {
    count(): CountQueryPromise
  }
}

RelationalQueryBuilder.prototype.count = function (): CountQueryPromise {
  const { table, dialect, session } = this as unknown as {
    table: PgTable
    dialect: PgDialect
    session: PgSession
  }

  const query = sql`select count(*) from ${table}`
  // mysql-remove-next-line
  const mode = DIALECT === 'pg' ? 'pool' : 'sync'
  // mysql-insert: const mode = 'default'

  return {
    // @start then
    then(onfulfilled, onrejected): any {
      return session
        .execute<{ count: number }[]>(query)
        .then(results => Number(results[0].count))
        .then(onfulfilled, onrejected)
    },
    // @end then
    toSQL: () => dialect.sqlToQuery(query),
  }
}
"#;

/// Render `source` as template `file_name` for one dialect.
fn render(manifest_toml: &str, file_name: &str, source: &str, dialect: Dialect) -> String {
    let manifest = Manifest::from_str(manifest_toml).expect("Failed to parse manifest");
    let generator = Generator::new(manifest, ".").expect("Failed to create generator");
    let template = Template::new(file_name, source);

    let rendered = generator.render(&[template], &[dialect]);
    assert!(rendered.failures.is_empty(), "{:?}", rendered.failures);
    rendered.modules[0].content.clone()
}

#[test]
fn test_count_sqlite() {
    let output = render("", "count.ts", COUNT, Dialect::Sqlite);
    insta::assert_snapshot!(output, @r"
import { sql } from 'drizzle-orm'
import { SQLiteDialect, SQLiteSession, SQLiteTable } from 'drizzle-orm/sqlite-core'
import { RelationalQueryBuilder } from 'drizzle-orm/sqlite-core/query-builders/query'

declare module 'drizzle-orm/sqlite-core/query-builders/query' {
  export interface RelationalQueryBuilder<
    TMode extends 'sync' | 'async',
    TSchema extends TablesRelationalConfig,
    TFields extends TableRelationalConfig,
  > {
    count(): CountQueryPromise
  }
}

RelationalQueryBuilder.prototype.count = function (): CountQueryPromise {
  const { table, dialect, session } = this as unknown as {
    table: SQLiteTable
    dialect: SQLiteDialect
    session: SQLiteSession<'sync' | 'async', any>
  }

  const query = sql`select count(*) from ${table}`
  const mode = false ? 'pool' : 'sync'

  return {
    then(onfulfilled, onrejected): any {
      return session
        .get<{ count: number }>(query)
        .then(row => Number(row.count))
        .then(onfulfilled, onrejected)
    },
    toSQL: () => dialect.sqlToQuery(query),
  }
}
");
}

#[test]
fn test_count_mysql() {
    let output = render("", "count.ts", COUNT, Dialect::Mysql);

    assert!(output.contains("import { MySqlDialect, MySqlSession, MySqlTable } from 'drizzle-orm/mysql-core'"));
    assert!(output.contains(
        "  export interface RelationalQueryBuilder<\n    TPreparedQueryHKT extends import('drizzle-orm/mysql-core').PreparedQueryHKTBase,\n    TSchema"
    ));
    assert!(output.contains("    session: MySqlSession<any, any>\n"));
    assert!(output.contains("  const query = sql`select count(*) from ${table}`\n  const mode = 'default'\n\n"));
    assert!(output.contains(
        "        .execute<[{ count: number }[], unknown]>(query)\n        .then(([rows]) => Number(rows[0].count))\n"
    ));
    assert!(!output.contains("DIALECT"));
}

#[test]
fn test_count_reference_is_verbatim() {
    assert_eq!(render("", "count.ts", COUNT, Dialect::Pg), COUNT);
}

#[test]
fn test_then_snippet_override() {
    let manifest = r#"
        [dialects.sqlite.snippets]
        then = "then(a, b) { return sqliteSpecific(a, b) }"
    "#;
    let source = "\
export const q = {
  // @start then
  then(a, b) { return generic(a, b) },
  // @end then
}
";

    let sqlite = render(manifest, "query.ts", source, Dialect::Sqlite);
    insta::assert_snapshot!(sqlite, @r"
export const q = {
  then(a, b) { return sqliteSpecific(a, b) }
}
");

    let mysql = render(manifest, "query.ts", source, Dialect::Mysql);
    insta::assert_snapshot!(mysql, @r"
export const q = {
  then(a, b) { return generic(a, b) },
}
");
}

#[test]
fn test_override_key_with_reference_prefix() {
    let manifest = r#"
        [dialects.sqlite.snippets]
        PgThen = "then() { return sqliteSpecific() }"
    "#;
    let source = "\
export const q = {
  // @start PgThen
  then() { return generic() },
  // @end PgThen
}
";

    let sqlite = render(manifest, "query.ts", source, Dialect::Sqlite);
    assert_eq!(
        sqlite,
        "export const q = {\n  then() { return sqliteSpecific() }\n}\n"
    );
}

#[test]
fn test_builder_type_params() {
    let manifest = r#"
        [types]
        builder = "Builder"
    "#;
    let source = "\
interface Builder<TSchema, TFields> {}
class Extended extends Builder<TSchema, TFields> {}
";

    let output = render(manifest, "builder.ts", source, Dialect::Sqlite);
    insta::assert_snapshot!(output, @r"
interface Builder<TMode extends 'sync' | 'async', TSchema, TFields> {}
class Extended extends Builder<any, TSchema, TFields> {}
");
}
