//! Algebraic simplifications applied while rendering. Nothing here allocates
//!  or mutates: a rewrite either points at an existing subtree or reports that
//!  the node is a constant.

use crate::ast::{EqualityOp, Expression, UnaryOp};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryRewrite<'a> {
    /// No rule applies.
    Keep,
    /// `NOT (NOT x)` => `x`
    Operand(&'a Expression),
    /// `NOT (x IS NULL)` => `x IS NOT NULL`, and the reverse.
    Unary(UnaryOp, &'a Expression),
    /// A null check over a literal, decided up front.
    Constant(bool),
}

pub fn rewrite_unary(op: UnaryOp, operand: &Expression) -> UnaryRewrite<'_> {
    match (op, operand) {
        (UnaryOp::Not, Expression::UnaryOperator(inner, x)) => match inner.negated() {
            None => UnaryRewrite::Operand(x),
            Some(flipped) => UnaryRewrite::Unary(flipped, x),
        },
        (UnaryOp::IsNull, Expression::Literal(v)) => UnaryRewrite::Constant(v.is_null()),
        (UnaryOp::IsNotNull, Expression::Literal(v)) => UnaryRewrite::Constant(!v.is_null()),
        _ => UnaryRewrite::Keep,
    }
}

/// True when an equality whose main operand is a literal can only hold:
///  `=` if any operand has the same value, `!=` if every operand is a
///  literal and none has the same value. Columns are never folded.
pub fn equality_always_true(op: EqualityOp, main: &Expression, operands: &[Expression]) -> bool {
    let Some(main) = main.as_literal() else {
        return false;
    };
    match op {
        EqualityOp::Eq => operands.iter().any(|o| o.as_literal() == Some(main)),
        EqualityOp::NotEq => operands
            .iter()
            .all(|o| o.as_literal().is_some_and(|v| v != main)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    fn field(name: &str) -> Expression {
        Expression::Field(name.into())
    }

    fn lit(v: impl Into<Value>) -> Expression {
        Expression::Literal(v.into())
    }

    fn unary(op: UnaryOp, e: Expression) -> Expression {
        Expression::UnaryOperator(op, Box::new(e))
    }

    #[test]
    fn double_negation_cancels() {
        let x = field("age");
        let inner = unary(UnaryOp::Not, x.clone());
        assert_eq!(rewrite_unary(UnaryOp::Not, &inner), UnaryRewrite::Operand(&x));
    }

    #[test]
    fn negated_null_checks_flip() {
        let x = field("date_joined");
        assert_eq!(
            rewrite_unary(UnaryOp::Not, &unary(UnaryOp::IsNull, x.clone())),
            UnaryRewrite::Unary(UnaryOp::IsNotNull, &x)
        );
        assert_eq!(
            rewrite_unary(UnaryOp::Not, &unary(UnaryOp::IsNotNull, x.clone())),
            UnaryRewrite::Unary(UnaryOp::IsNull, &x)
        );
    }

    #[test]
    fn null_checks_on_literals_are_constant() {
        assert_eq!(
            rewrite_unary(UnaryOp::IsNull, &Expression::Literal(Value::Null)),
            UnaryRewrite::Constant(true)
        );
        assert_eq!(
            rewrite_unary(UnaryOp::IsNotNull, &lit("x")),
            UnaryRewrite::Constant(true)
        );
        assert_eq!(
            rewrite_unary(UnaryOp::IsNull, &lit(5_i64)),
            UnaryRewrite::Constant(false)
        );
        assert_eq!(
            rewrite_unary(UnaryOp::IsNotNull, &Expression::Literal(Value::Null)),
            UnaryRewrite::Constant(false)
        );
        assert_eq!(rewrite_unary(UnaryOp::IsNull, &field("age")), UnaryRewrite::Keep);
    }

    #[test]
    fn not_over_other_nodes_is_kept() {
        let and = Expression::Logical(crate::ast::LogicalOp::And, vec![field("a"), field("b")]);
        assert_eq!(rewrite_unary(UnaryOp::Not, &and), UnaryRewrite::Keep);
        assert_eq!(rewrite_unary(UnaryOp::Not, &lit(true)), UnaryRewrite::Keep);
    }

    #[test]
    fn equality_folding() {
        let three = lit(3_i64);
        assert!(equality_always_true(EqualityOp::Eq, &three, &[lit(1_i64), lit(3_i64)]));
        assert!(!equality_always_true(EqualityOp::Eq, &three, &[lit(4_i64)]));
        assert!(equality_always_true(EqualityOp::NotEq, &three, &[lit(4_i64), lit("3")]));
        assert!(!equality_always_true(EqualityOp::NotEq, &three, &[lit(3_i64)]));
        // a column could hold anything
        assert!(!equality_always_true(EqualityOp::NotEq, &three, &[field("age")]));
        assert!(!equality_always_true(EqualityOp::Eq, &field("age"), &[lit(3_i64)]));
        assert!(equality_always_true(
            EqualityOp::Eq,
            &Expression::Literal(Value::Null),
            &[Expression::Literal(Value::Null)]
        ));
    }
}
