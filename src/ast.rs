use std::fmt::{Display, Formatter};

pub use serde_json::Number;

/// A scalar carried by a literal node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    /// Rendered single-quoted and escaped.
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    IsNull,
    IsNotNull,
}

impl UnaryOp {
    /// The operator a `NOT` applied on top of this one reduces to, if any.
    pub fn negated(self) -> Option<UnaryOp> {
        match self {
            UnaryOp::Not => None,
            UnaryOp::IsNull => Some(UnaryOp::IsNotNull),
            UnaryOp::IsNotNull => Some(UnaryOp::IsNull),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Lt,
    Gt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityOp {
    Eq,
    NotEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::Gt => write!(f, ">"),
        }
    }
}

impl Display for EqualityOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EqualityOp::Eq => write!(f, "="),
            EqualityOp::NotEq => write!(f, "<>"),
        }
    }
}

impl Display for LogicalOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

/// A dialect-agnostic boolean/comparison tree. Built once by the parser and
///  never mutated afterwards; every rewrite borrows from it or produces a
///  constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    /// A resolved column name.
    Field(String),
    UnaryOperator(UnaryOp, Box<Expression>),
    BinaryOperator(Box<Expression>, BinaryOp, Box<Expression>),
    /// `main = a`, `main IN (a, b, ...)` and their negations.
    /// `operands` is never empty when produced by the parser.
    Equality {
        op: EqualityOp,
        main: Box<Expression>,
        operands: Vec<Expression>,
    },
    /// `operands` is never empty when produced by the parser.
    Logical(LogicalOp, Vec<Expression>),
}

impl Expression {
    /// The literal value if this node is a constant (not a column).
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Expression::Literal(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_logical(&self, op: LogicalOp) -> bool {
        matches!(self, Expression::Logical(o, _) if *o == op)
    }
}

impl From<Value> for Expression {
    fn from(v: Value) -> Self {
        Expression::Literal(v)
    }
}
