use serde_json::Value as RawNode;

use crate::{
    ast::Expression,
    parser::{Error, FieldMap, Parser, ParserConfig, Result},
    to_sql::{Printer, PrinterConfig},
    translate::{Dialect, Rendered, RowLimit, TranslationContext},
};

pub const WHERE_KEY: &str = "where";
pub const LIMIT_KEY: &str = "limit";

/// `WHERE <root>`, elided entirely when the root is always true.
#[derive(Debug, Clone, PartialEq)]
pub struct Where(pub Expression);

impl Where {
    pub fn to_sql<C: TranslationContext + ?Sized>(&self, cx: &C) -> String {
        match cx.translate(&self.0) {
            Rendered::AlwaysTrue => String::new(),
            condition => format!(" WHERE {}", condition.into_condition()),
        }
    }
}

/// The row limit. Its keyword and position depend on the dialect, see
///  [RowLimit].
#[derive(Debug, Clone, PartialEq)]
pub struct Limit(pub Expression);

impl Limit {
    pub fn to_sql<C: TranslationContext + ?Sized>(&self, cx: &C) -> String {
        let value = cx.translate(&self.0).into_operand();
        match cx.row_limit() {
            RowLimit::Suffix => format!(" LIMIT {value}"),
            RowLimit::Top => format!(" TOP {value}"),
        }
    }
}

/// A parsed query record. Built once; render it for as many dialects as
///  needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub where_clause: Option<Where>,
    pub limit: Option<Limit>,
}

impl Query {
    /// Builds a query from a record with optional `where` and `limit` keys.
    ///  Other keys are ignored.
    pub fn parse(raw: &RawNode, fields: &FieldMap) -> Result<Self> {
        Self::parse_with(raw, &Parser::new(fields, ParserConfig::default()))
    }

    pub fn parse_with(raw: &RawNode, parser: &Parser) -> Result<Self> {
        let RawNode::Object(record) = raw else {
            return Err(Error::InvalidQuery(raw.clone()));
        };
        let where_clause = record
            .get(WHERE_KEY)
            .map(|root| parser.parse(root).map(Where))
            .transpose()?;
        let limit = record
            .get(LIMIT_KEY)
            .map(|value| parse_limit(parser, value).map(Limit))
            .transpose()?;
        Ok(Self {
            where_clause,
            limit,
        })
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        Printer::new(self, PrinterConfig::new(dialect)).to_string()
    }
}

fn parse_limit(parser: &Parser, raw: &RawNode) -> Result<Expression> {
    match parser.parse(raw)? {
        literal @ Expression::Literal(_) => Ok(literal),
        _ => Err(Error::InvalidLimit(raw.clone())),
    }
}
