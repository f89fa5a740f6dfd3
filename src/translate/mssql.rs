//! SQL Server has no LIMIT; the row count goes in a `TOP n` right after
//!  `SELECT`. Expressions render as in PostgreSQL, including the double-quoted
//!  identifiers (valid under `QUOTED_IDENTIFIER ON`, the default).

use super::{
    Dialect, Rendered, RowLimit, TranslationContext,
    postgres::{self, translate_binary_op},
};
use crate::ast::{BinaryOp, Expression};

#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlTranslator;

impl TranslationContext for MssqlTranslator {
    fn dialect(&self) -> Dialect {
        Dialect::SqlServer
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{name}\"")
    }

    fn row_limit(&self) -> RowLimit {
        RowLimit::Top
    }

    fn translate(&self, source: &Expression) -> Rendered {
        postgres::translate(source, self)
    }

    fn translate_binary_op(&self, l: &Expression, op: BinaryOp, r: &Expression) -> Rendered {
        translate_binary_op(self, l, op, r)
    }
}
