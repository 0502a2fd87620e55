//! Replacers shipped with the generator.

use dialectic_manifest::Dialect;
use eyre::{Result, bail};
use regex::{Captures, Regex};

use super::Replacer;
use crate::pipeline::RenderContext;

/// Swaps Postgres' `json_agg(` for the dialect's JSON array aggregate.
pub struct JsonAggregate;

impl JsonAggregate {
    /// The aggregate function call prefix for `dialect`.
    pub fn function(dialect: Dialect) -> &'static str {
        match dialect {
            Dialect::Pg => "json_agg(",
            Dialect::Mysql => "json_arrayagg(",
            Dialect::Sqlite => "json_group_array(",
        }
    }
}

impl Replacer for JsonAggregate {
    fn name(&self) -> &str {
        "json-aggregate"
    }

    fn apply(&self, text: &str, ctx: &RenderContext<'_>) -> Result<String> {
        let call = Regex::new(r"\bjson_agg\(")?;
        if !call.is_match(text) {
            bail!("expected a `json_agg(` call to rewrite");
        }
        Ok(call
            .replace_all(text, Self::function(ctx.dialect()))
            .into_owned())
    }
}

/// Rewrites how the result of a `count(*)` query is decoded.
///
/// The reference template reads `results[0].count` from an array of rows.
/// SQLite returns a single row from `get`, and MySQL resolves to a
/// `[rows, fields]` tuple. The `execute` row type is rewritten to match.
pub struct CountDecoding;

impl Replacer for CountDecoding {
    fn name(&self) -> &str {
        "count-decoding"
    }

    fn apply(&self, text: &str, ctx: &RenderContext<'_>) -> Result<String> {
        let dialect = ctx.dialect();
        let closure = Regex::new(
            r"(?:\(\s*(\w+)\s*\)|(\w+))\s*=>\s*Number\(\s*(\w+)\[0\]\.(\w+)\s*\)",
        )?;

        let mut found = 0;
        let text = closure.replace_all(text, |caps: &Captures| {
            let param = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
            if param != Some(&caps[3]) {
                return caps[0].to_string();
            }
            found += 1;
            let field = &caps[4];
            match dialect {
                Dialect::Pg => caps[0].to_string(),
                Dialect::Mysql => format!("([rows]) => Number(rows[0].{})", field),
                Dialect::Sqlite => format!("row => Number(row.{})", field),
            }
        });

        if found == 0 {
            bail!("no `results => Number(results[0].<field>)` decoding site found");
        }

        // The row type must match the new decoding shape.
        let execute = Regex::new(r"\.execute<(\{[^}]*\})\[\]>\(")?;
        let rows = match dialect {
            Dialect::Pg => return Ok(text.into_owned()),
            Dialect::Mysql => ".execute<[$1[], unknown]>(",
            Dialect::Sqlite => ".get<$1>(",
        };
        Ok(execute.replace_all(&text, rows).into_owned())
    }
}
