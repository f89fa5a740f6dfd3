use std::fmt::{Display, Formatter, Result};

use crate::{
    ast::Expression,
    query::Query,
    translate::{Dialect, RowLimit},
};

pub const DEFAULT_TABLE: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterConfig {
    pub dialect: Dialect,
    /// Table selected from. Quoted like a column when needed.
    pub table: String,
}

impl PrinterConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::PostgreSql,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

pub struct Printer<T> {
    tree: T,
    config: PrinterConfig,
}

impl<T> Printer<T> {
    pub fn new(tree: T, config: PrinterConfig) -> Self {
        Self { tree, config }
    }
}

pub trait ToSQL {
    fn to_sql(&self, out: &mut Formatter, conf: &PrinterConfig) -> Result;
}

impl<T> ToSQL for &T
where
    T: ToSQL + ?Sized,
{
    fn to_sql(&self, out: &mut Formatter, conf: &PrinterConfig) -> Result {
        (**self).to_sql(out, conf)
    }
}

impl<T> Display for Printer<T>
where
    T: ToSQL,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.tree.to_sql(f, &self.config)
    }
}

/// A bare expression prints as a condition; an always-true one prints as
///  nothing.
impl ToSQL for Expression {
    fn to_sql(&self, out: &mut Formatter, conf: &PrinterConfig) -> Result {
        let cx = conf.dialect.translator();
        out.write_str(&cx.translate(self).into_condition())
    }
}

/// Assembles the full statement:
///   `SELECT * FROM data [WHERE ...] [LIMIT n];`
/// or, where the dialect puts the limit up front:
///   `SELECT [TOP n] * FROM data [WHERE ...];`
impl ToSQL for Query {
    fn to_sql(&self, out: &mut Formatter, conf: &PrinterConfig) -> Result {
        let cx = conf.dialect.translator();
        let limit = self.limit.as_ref().map(|l| l.to_sql(cx));
        let condition = self.where_clause.as_ref().map(|w| w.to_sql(cx));

        write!(out, "SELECT")?;
        if let (RowLimit::Top, Some(limit)) = (cx.row_limit(), &limit) {
            out.write_str(limit)?;
        }
        write!(out, " * FROM {}", cx.identifier(&conf.table))?;
        if let Some(condition) = &condition {
            out.write_str(condition)?;
        }
        if let (RowLimit::Suffix, Some(limit)) = (cx.row_limit(), &limit) {
            out.write_str(limit)?;
        }
        write!(out, ";")
    }
}
