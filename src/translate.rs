use std::{fmt::Formatter, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ast::{BinaryOp, Expression};

pub mod mssql;
pub mod mysql;
pub mod postgres;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "MySQL", alias = "mysql")]
    MySql,
    #[serde(rename = "PostgreSQL", alias = "postgresql", alias = "postgres")]
    PostgreSql,
    #[serde(rename = "SQLServer", alias = "sqlserver", alias = "mssql")]
    SqlServer,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::MySql, Dialect::PostgreSql, Dialect::SqlServer];

    pub fn translator(self) -> &'static dyn TranslationContext {
        match self {
            Dialect::MySql => &mysql::MysqlTranslator,
            Dialect::PostgreSql => &postgres::PostgresTranslator,
            Dialect::SqlServer => &mssql::MssqlTranslator,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MySql => write!(f, "MySQL"),
            Dialect::PostgreSql => write!(f, "PostgreSQL"),
            Dialect::SqlServer => write!(f, "SQLServer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect: {0} (expected MySQL, PostgreSQL or SQLServer)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "postgresql" | "postgres" => Ok(Dialect::PostgreSql),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

/// The output of rendering a node. Simplification can prove a node constant,
///  in which case no SQL is produced for it and the enclosing node decides
///  what to do with the constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Sql(String),
    AlwaysTrue,
    AlwaysFalse,
}

impl Rendered {
    pub fn constant(value: bool) -> Self {
        if value {
            Rendered::AlwaysTrue
        } else {
            Rendered::AlwaysFalse
        }
    }

    /// Text for use inside a larger expression: constants become `TRUE` and
    ///  `FALSE`.
    pub fn into_operand(self) -> String {
        match self {
            Rendered::Sql(sql) => sql,
            Rendered::AlwaysTrue => "TRUE".to_string(),
            Rendered::AlwaysFalse => "FALSE".to_string(),
        }
    }

    /// Text for use as a whole condition: always-true elides to nothing.
    pub fn into_condition(self) -> String {
        match self {
            Rendered::AlwaysTrue => String::new(),
            other => other.into_operand(),
        }
    }
}

/// Where a dialect puts the row limit of a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLimit {
    /// `SELECT * FROM t ... LIMIT n`
    Suffix,
    /// `SELECT TOP n * FROM t ...`
    Top,
}

/// Per-dialect rendering. A new dialect implements the few things that differ
///  and delegates the rest to the PostgreSQL functions:
///
/// ```rust
/// # use query_expr::{ast::{BinaryOp, Expression}, translate::{Dialect, Rendered, RowLimit, TranslationContext, postgres}};
/// struct SqliteTranslator;
///
/// impl TranslationContext for SqliteTranslator {
///     fn dialect(&self) -> Dialect {
///         Dialect::PostgreSql
///     }
///
///     fn quote_identifier(&self, name: &str) -> String {
///         format!("[{name}]")
///     }
///
///     fn row_limit(&self) -> RowLimit {
///         RowLimit::Suffix
///     }
///
///     fn translate(&self, source: &Expression) -> Rendered {
///         postgres::translate(source, self)
///     }
///
///     fn translate_binary_op(&self, l: &Expression, op: BinaryOp, r: &Expression) -> Rendered {
///         postgres::translate_binary_op(self, l, op, r)
///     }
/// }
///
/// let sql = SqliteTranslator.translate(&Expression::Field("first name".into()));
/// assert_eq!(sql, Rendered::Sql("[first name]".into()));
/// ```
pub trait TranslationContext {
    /// The dialect tag this context renders for.
    fn dialect(&self) -> Dialect;

    /// Wraps a column name that contains characters SQL would misread.
    fn quote_identifier(&self, name: &str) -> String;

    fn row_limit(&self) -> RowLimit;

    /// Called to render an expression generally.
    fn translate(&self, source: &Expression) -> Rendered;

    /// Called to render `<` and `>`.
    fn translate_binary_op(&self, l: &Expression, op: BinaryOp, r: &Expression) -> Rendered;

    /// A column or table name, quoted only when needed.
    fn identifier(&self, name: &str) -> String {
        if needs_quoting(name) {
            self.quote_identifier(name)
        } else {
            name.to_string()
        }
    }
}

static QUOTED_IDENTIFIER_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-.+~|]").expect("identifier pattern is valid"));

/// Whitespace and `- . + ~ |` force an identifier to be quoted.
pub fn needs_quoting(name: &str) -> bool {
    QUOTED_IDENTIFIER_CHARS.is_match(name)
}

/// Backslash-escapes both quote characters.
pub fn escape_quotes(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\'' || c == '"' {
            res.push('\\');
        }
        res.push(c);
    }
    res
}

/// Renders `source` for `dialect`.
pub fn render(source: &Expression, dialect: Dialect) -> Rendered {
    dialect.translator().translate(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes() {
        assert_eq!("foo", escape_quotes("foo"));
        assert_eq!(r"I\'ve", escape_quotes("I've"));
        assert_eq!(r#"say \"hi\""#, escape_quotes(r#"say "hi""#));
        assert_eq!(r#"\'\""#, escape_quotes(r#"'""#));
    }

    #[test]
    fn quoting_character_class() {
        for name in ["update-at", "a.b", "a+b", "a~b", "a|b", "first name", "tab\there"] {
            assert!(needs_quoting(name), "{name}");
        }
        for name in ["name", "date_joined", "age2", "a$b", "a*b"] {
            assert!(!needs_quoting(name), "{name}");
        }
    }

    #[test]
    fn dialect_names() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>(), Ok(dialect));
            assert_eq!(dialect.translator().dialect(), dialect);
        }
        assert_eq!("postgres".parse::<Dialect>(), Ok(Dialect::PostgreSql));
        assert_eq!("MSSQL".parse::<Dialect>(), Ok(Dialect::SqlServer));
        assert!("oracle".parse::<Dialect>().is_err());
    }

    #[test]
    fn dialect_serde() {
        assert_eq!(
            serde_json::to_string(&Dialect::SqlServer).unwrap(),
            r#""SQLServer""#
        );
        assert_eq!(
            serde_json::from_str::<Dialect>(r#""mysql""#).unwrap(),
            Dialect::MySql
        );
    }

    #[test]
    fn lowering_constants() {
        assert_eq!(Rendered::AlwaysTrue.into_condition(), "");
        assert_eq!(Rendered::AlwaysTrue.into_operand(), "TRUE");
        assert_eq!(Rendered::AlwaysFalse.into_condition(), "FALSE");
        assert_eq!(Rendered::Sql("a".into()).into_condition(), "a");
    }
}
