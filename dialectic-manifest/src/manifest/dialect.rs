//! The closed set of SQL dialects the generator targets.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Supported SQL dialect backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL
    Pg,
    /// MySQL
    Mysql,
    /// SQLite
    Sqlite,
}

impl Dialect {
    /// Every dialect, in generation order.
    pub const ALL: [Dialect; 3] = [Dialect::Pg, Dialect::Mysql, Dialect::Sqlite];

    /// Returns the dialect identifier as a static string.
    ///
    /// This is also the directive tag (`mysql-insert:`), the output directory
    /// name and the literal substituted for the dialect placeholder.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Pg => "pg",
            Dialect::Mysql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Parse a directive tag. Only the canonical identifiers are accepted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == tag)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" => Ok(Dialect::Pg),
            "mysql" => Ok(Dialect::Mysql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(format!(
                "unknown dialect '{}', expected 'pg', 'mysql' or 'sqlite'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Dialect::from_str("pg").unwrap(), Dialect::Pg);
        assert_eq!(Dialect::from_str("Postgres").unwrap(), Dialect::Pg);
        assert_eq!(Dialect::from_str("MySQL").unwrap(), Dialect::Mysql);
        assert_eq!(Dialect::from_str("sqlite").unwrap(), Dialect::Sqlite);
        assert!(Dialect::from_str("mssql").is_err());
    }

    #[test]
    fn test_from_tag_is_strict() {
        assert_eq!(Dialect::from_tag("sqlite"), Some(Dialect::Sqlite));
        assert_eq!(Dialect::from_tag("postgres"), None);
        assert_eq!(Dialect::from_tag("SQLite"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dialect::Pg.to_string(), "pg");
        assert_eq!(Dialect::Mysql.to_string(), "mysql");
    }

    #[test]
    fn test_deserialize() {
        let sqlite: Dialect = serde_json::from_str(r#""sqlite""#).unwrap();
        assert_eq!(sqlite, Dialect::Sqlite);
        assert!(serde_json::from_str::<Dialect>(r#""oracle""#).is_err());
    }
}
