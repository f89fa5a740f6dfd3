pub mod ast;
pub mod config;
#[doc(hidden)]
pub mod fuzz_helper;
pub mod parser;
pub mod query;
pub mod rewrite;
pub mod to_sql;
pub mod translate;


pub use parser::{Error, FieldMap};
pub use query::Query;
pub use translate::Dialect;

/// Parses a query record and renders it for one dialect.
pub fn generate_sql(
    fields: &FieldMap,
    raw: &serde_json::Value,
    dialect: Dialect,
) -> parser::Result<String> {
    Ok(Query::parse(raw, fields)?.to_sql(dialect))
}
