use super::{
    Dialect, Rendered, RowLimit, TranslationContext,
    postgres::{self, PostgresTranslator},
};
use crate::ast::{BinaryOp, Expression};

/// MySQL quotes identifiers with backticks; everything else matches
///  PostgreSQL.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlTranslator;

impl TranslationContext for MysqlTranslator {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{name}`")
    }

    fn row_limit(&self) -> RowLimit {
        RowLimit::Suffix
    }

    fn translate(&self, source: &Expression) -> Rendered {
        postgres::translate(source, self)
    }

    /// `<` and `>` take the PostgreSQL path wholesale, operands included, so
    ///  a quoted column under them gets double quotes rather than backticks.
    fn translate_binary_op(&self, l: &Expression, op: BinaryOp, r: &Expression) -> Rendered {
        postgres::translate_binary_op(&PostgresTranslator, l, op, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{EqualityOp, Value};

    fn field(name: &str) -> Expression {
        Expression::Field(name.into())
    }

    #[test]
    fn backticks() {
        assert_eq!(
            MysqlTranslator.translate(&field("update-at")),
            Rendered::Sql("`update-at`".into())
        );
        let eq = Expression::Equality {
            op: EqualityOp::Eq,
            main: Box::new(field("update-at")),
            operands: vec![Expression::Literal(Value::from("x"))],
        };
        assert_eq!(
            MysqlTranslator.translate(&eq),
            Rendered::Sql("`update-at` = 'x'".into())
        );
    }

    #[test]
    fn binary_operands_render_as_postgres() {
        let gt = Expression::BinaryOperator(
            Box::new(field("update-at")),
            BinaryOp::Gt,
            Box::new(Expression::Literal(Value::from(3_i64))),
        );
        assert_eq!(
            MysqlTranslator.translate(&gt),
            Rendered::Sql("\"update-at\" > 3".into())
        );
    }
}
