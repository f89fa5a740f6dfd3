#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use serde_json::{Value, json};

const TAGS: [&str; 11] = [
    "field", "and", "or", "not", "is-empty", "not-empty", "<", ">", "=", "!=", "bogus",
];
const MAX_DEPTH: usize = 12;

/// Raw trees that are mostly well-formed, so the fuzzer spends its time in
///  the rewrite and rendering code rather than bouncing off the parser.
#[derive(Debug)]
pub struct TreeInput {
    pub raw: Value,
}

fn scalar(u: &mut Unstructured) -> arbitrary::Result<Value> {
    Ok(match u.int_in_range(0..=4)? {
        0 => Value::Null,
        1 => Value::Bool(u.arbitrary()?),
        2 => json!(u.int_in_range(-3i64..=3)?),
        3 => Value::String(u.arbitrary()?),
        _ => json!(["field", u.int_in_range(0i64..=6)?]),
    })
}

fn node(u: &mut Unstructured, depth: usize) -> arbitrary::Result<Value> {
    if depth >= MAX_DEPTH || u.ratio(1, 3)? {
        return scalar(u);
    }
    let tag = *u.choose(&TAGS)?;
    let mut items = vec![Value::from(tag)];
    for _ in 0..u.int_in_range(0..=4)? {
        items.push(node(u, depth + 1)?);
    }
    Ok(Value::Array(items))
}

impl<'a> Arbitrary<'a> for TreeInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut record = serde_json::Map::new();
        if u.arbitrary()? {
            record.insert("where".into(), node(u, 0)?);
        }
        if u.arbitrary()? {
            record.insert("limit".into(), scalar(u)?);
        }
        Ok(TreeInput {
            raw: Value::Object(record),
        })
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = Unstructured::new(data).arbitrary::<TreeInput>() {
        query_expr::fuzz_helper::translate_value(&input.raw);
    }
});
