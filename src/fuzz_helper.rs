use serde_json::Value as RawNode;

use crate::{
    parser::{FieldMap, Parser, ParserConfig},
    query::Query,
    translate::{Dialect, render},
};

fn fields() -> FieldMap {
    [(1, "id"), (2, "name"), (3, "date_joined"), (4, "age"), (5, "update-at")]
        .into_iter()
        .collect()
}

/// Feeds arbitrary text through the whole pipeline, ignoring errors.
pub fn translate_json(input: &str) {
    if let Ok(raw) = serde_json::from_str::<RawNode>(input) {
        translate_value(&raw);
    }
}

/// Renders `raw` both as a query record and as a bare expression.
pub fn translate_value(raw: &RawNode) {
    let fields = fields();
    let parser = Parser::new(&fields, ParserConfig::default());
    if let Ok(query) = Query::parse_with(raw, &parser) {
        for dialect in Dialect::ALL {
            let first = query.to_sql(dialect);
            assert_eq!(first, query.to_sql(dialect), "rendering is not deterministic");
            assert!(first.starts_with("SELECT") && first.ends_with(';'));
        }
    }
    if let Ok(expr) = parser.parse(raw) {
        for dialect in Dialect::ALL {
            _ = render(&expr, dialect);
        }
    }
}
