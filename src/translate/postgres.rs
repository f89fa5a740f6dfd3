use super::{Dialect, Rendered, RowLimit, TranslationContext, escape_quotes};
use crate::{
    ast::{BinaryOp, EqualityOp, Expression as E, LogicalOp, UnaryOp, Value},
    rewrite::{UnaryRewrite, equality_always_true, rewrite_unary},
};

/// PostgreSQL rendering. The free functions in this module are also the
///  default rendering paths other dialects delegate to.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresTranslator;

impl TranslationContext for PostgresTranslator {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSql
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{name}\"")
    }

    fn row_limit(&self) -> RowLimit {
        RowLimit::Suffix
    }

    fn translate(&self, source: &E) -> Rendered {
        translate(source, self)
    }

    fn translate_binary_op(&self, l: &E, op: BinaryOp, r: &E) -> Rendered {
        translate_binary_op(self, l, op, r)
    }
}

/// Renders an expression tree, recursing through `cx` so dialect overrides
///  apply at every level.
pub fn translate<C: TranslationContext + ?Sized>(source: &E, cx: &C) -> Rendered {
    match source {
        E::Literal(v) => Rendered::Sql(translate_literal(v)),
        E::Field(name) => Rendered::Sql(cx.identifier(name)),
        E::UnaryOperator(op, operand) => translate_unary_op(cx, *op, operand),
        E::BinaryOperator(l, op, r) => cx.translate_binary_op(l, *op, r),
        E::Equality { op, main, operands } => translate_equality(cx, *op, main, operands),
        E::Logical(op, operands) => translate_logical(cx, *op, operands),
    }
}

pub fn translate_literal(v: &Value) -> String {
    match v {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", escape_quotes(s)),
    }
}

pub fn translate_unary_op<C: TranslationContext + ?Sized>(
    cx: &C,
    op: UnaryOp,
    operand: &E,
) -> Rendered {
    match rewrite_unary(op, operand) {
        UnaryRewrite::Operand(x) => cx.translate(x),
        // the flipped node may itself fold, e.g. NOT (NULL IS NULL)
        UnaryRewrite::Unary(op, x) => translate_unary_op(cx, op, x),
        UnaryRewrite::Constant(v) => Rendered::constant(v),
        UnaryRewrite::Keep => {
            let operand = cx.translate(operand).into_operand();
            Rendered::Sql(match op {
                UnaryOp::Not => format!("NOT {operand}"),
                UnaryOp::IsNull => format!("{operand} IS NULL"),
                UnaryOp::IsNotNull => format!("{operand} IS NOT NULL"),
            })
        }
    }
}

pub fn translate_binary_op<C: TranslationContext + ?Sized>(
    cx: &C,
    l: &E,
    op: BinaryOp,
    r: &E,
) -> Rendered {
    Rendered::Sql(format!(
        "{} {op} {}",
        cx.translate(l).into_operand(),
        cx.translate(r).into_operand()
    ))
}

pub fn translate_equality<C: TranslationContext + ?Sized>(
    cx: &C,
    op: EqualityOp,
    main: &E,
    operands: &[E],
) -> Rendered {
    if equality_always_true(op, main, operands) {
        return Rendered::AlwaysTrue;
    }
    let main = cx.translate(main).into_operand();
    if let [operand] = operands {
        return Rendered::Sql(format!(
            "{main} {op} {}",
            cx.translate(operand).into_operand()
        ));
    }

    let keyword = match op {
        EqualityOp::Eq => "IN",
        EqualityOp::NotEq => "NOT IN",
    };
    let mut sql = format!("{main} {keyword} (");
    let mut is_first = true;
    for operand in operands {
        if is_first {
            is_first = false;
        } else {
            sql.push_str(", ");
        }
        sql.push_str(&cx.translate(operand).into_operand());
    }
    sql.push(')');
    Rendered::Sql(sql)
}

/// AND drops always-true operands and OR drops always-false ones. The
///  absorbing constant (false for AND, true for OR) short-circuits the node.
///  An OR directly under an AND is parenthesized; nothing else is.
pub fn translate_logical<C: TranslationContext + ?Sized>(
    cx: &C,
    op: LogicalOp,
    operands: &[E],
) -> Rendered {
    let mut sql = String::new();
    let mut is_first = true;
    for operand in operands {
        let rendered = match (op, cx.translate(operand)) {
            (_, Rendered::Sql(s)) => s,
            (LogicalOp::Or, Rendered::AlwaysTrue) => return Rendered::AlwaysTrue,
            (LogicalOp::And, Rendered::AlwaysFalse) => return Rendered::AlwaysFalse,
            _ => continue,
        };

        if is_first {
            is_first = false;
        } else {
            sql.push_str(&format!(" {op} "));
        }
        if op == LogicalOp::And && operand.is_logical(LogicalOp::Or) {
            sql.push('(');
            sql.push_str(&rendered);
            sql.push(')');
        } else {
            sql.push_str(&rendered);
        }
    }

    if is_first {
        // every operand was the identity element
        Rendered::constant(op == LogicalOp::And)
    } else {
        Rendered::Sql(sql)
    }
}
