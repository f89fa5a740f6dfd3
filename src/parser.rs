use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value as RawNode;

use crate::ast::{BinaryOp, EqualityOp, Expression, LogicalOp, UnaryOp, Value};

/// Structural problems found while building an [Expression] from raw input.
/// Rendering never fails, so these are the only errors the core produces.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("operator `{op}` called with an incorrect number of operands (got {got})")]
    Arity { op: String, got: usize },
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
    #[error("no field with id {0}")]
    MissingField(i64),
    #[error("field {0} maps to an empty column name")]
    EmptyFieldName(i64),
    #[error("field id must be an integer, got {0}")]
    InvalidFieldId(RawNode),
    #[error("not a valid expression: {0}")]
    InvalidNode(RawNode),
    #[error("expression is nested deeper than {max} levels")]
    TooDeep { max: usize },
    #[error("query must be an object, got {0}")]
    InvalidQuery(RawNode),
    #[error("limit must be a literal value, got {0}")]
    InvalidLimit(RawNode),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read-only mapping from field id to column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(HashMap<i64, String>);

impl FieldMap {
    pub fn get(&self, id: i64) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<i64, String>> for FieldMap {
    fn from(map: HashMap<i64, String>) -> Self {
        Self(map)
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (i64, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, name)| (id, name.into())).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of operator arrays. Parsing and rendering both recurse
    ///  once per level, so this bounds stack use on untrusted input.
    pub max_depth: usize,
}

pub const DEFAULT_MAX_DEPTH: usize = 256;

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The operator tags recognized in the head position of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Field,
    Unary(UnaryOp),
    Logical(LogicalOp),
    Binary(BinaryOp),
    Equality(EqualityOp),
}

impl TryFrom<&str> for Operator {
    type Error = Error;
    fn try_from(tag: &str) -> Result<Self> {
        match tag {
            "field" => Ok(Operator::Field),
            "is-empty" => Ok(Operator::Unary(UnaryOp::IsNull)),
            "not-empty" => Ok(Operator::Unary(UnaryOp::IsNotNull)),
            "not" => Ok(Operator::Unary(UnaryOp::Not)),
            "and" => Ok(Operator::Logical(LogicalOp::And)),
            "or" => Ok(Operator::Logical(LogicalOp::Or)),
            "<" => Ok(Operator::Binary(BinaryOp::Lt)),
            ">" => Ok(Operator::Binary(BinaryOp::Gt)),
            "=" => Ok(Operator::Equality(EqualityOp::Eq)),
            "!=" => Ok(Operator::Equality(EqualityOp::NotEq)),
            _ => Err(Error::UnknownOperator(tag.to_string())),
        }
    }
}

pub struct Parser<'a> {
    fields: &'a FieldMap,
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    pub fn new(fields: &'a FieldMap, config: ParserConfig) -> Self {
        Self { fields, config }
    }

    pub fn parse(&self, raw: &RawNode) -> Result<Expression> {
        self.parse_node(raw, 1)
    }

    fn parse_node(&self, raw: &RawNode, depth: usize) -> Result<Expression> {
        if depth > self.config.max_depth {
            return Err(Error::TooDeep {
                max: self.config.max_depth,
            });
        }
        match raw {
            RawNode::Array(items) => match items.split_first() {
                Some((RawNode::String(tag), operands)) => {
                    self.parse_operator(tag, operands, depth)
                }
                _ => Err(Error::InvalidNode(raw.clone())),
            },
            RawNode::Object(_) => Err(Error::InvalidNode(raw.clone())),
            scalar => Ok(Expression::Literal(literal(scalar))),
        }
    }

    fn parse_operator(&self, tag: &str, operands: &[RawNode], depth: usize) -> Result<Expression> {
        let op = Operator::try_from(tag)?;
        let arity = || Error::Arity {
            op: tag.to_string(),
            got: operands.len(),
        };
        let child = |raw: &RawNode| self.parse_node(raw, depth + 1);

        match op {
            Operator::Field => match operands {
                [id] => self.resolve_field(id),
                _ => Err(arity()),
            },
            Operator::Unary(op) => match operands {
                [operand] => Ok(Expression::UnaryOperator(op, Box::new(child(operand)?))),
                _ => Err(arity()),
            },
            Operator::Binary(op) => match operands {
                [l, r] => Ok(Expression::BinaryOperator(
                    Box::new(child(l)?),
                    op,
                    Box::new(child(r)?),
                )),
                _ => Err(arity()),
            },
            Operator::Equality(op) => match operands {
                [main, rest @ ..] if !rest.is_empty() => Ok(Expression::Equality {
                    op,
                    main: Box::new(child(main)?),
                    operands: rest.iter().map(child).collect::<Result<_>>()?,
                }),
                _ => Err(arity()),
            },
            Operator::Logical(op) => {
                if operands.is_empty() {
                    return Err(arity());
                }
                let operands = operands.iter().map(child).collect::<Result<_>>()?;
                Ok(Expression::Logical(op, operands))
            }
        }
    }

    fn resolve_field(&self, id: &RawNode) -> Result<Expression> {
        let id = id
            .as_i64()
            .ok_or_else(|| Error::InvalidFieldId(id.clone()))?;
        match self.fields.get(id) {
            None => Err(Error::MissingField(id)),
            Some("") => Err(Error::EmptyFieldName(id)),
            Some(name) => Ok(Expression::Field(name.to_string())),
        }
    }
}

/// Converts a non-array, non-object raw value into a literal.
fn literal(raw: &RawNode) -> Value {
    match raw {
        RawNode::Bool(b) => Value::Bool(*b),
        RawNode::Number(n) => Value::Number(n.clone()),
        RawNode::String(s) => Value::String(s.clone()),
        _ => Value::Null,
    }
}

/// Parses an expression tree with the default [ParserConfig].
pub fn parse(raw: &RawNode, fields: &FieldMap) -> Result<Expression> {
    Parser::new(fields, ParserConfig::default()).parse(raw)
}
