#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;

#[derive(Debug)]
pub struct JsonInput {
    pub text: String,
}

impl<'a> Arbitrary<'a> for JsonInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let s: String = u.arbitrary()?;
        Ok(JsonInput {
            text: s.chars().take(MAX_INPUT_LENGTH).collect(),
        })
    }
}

const MAX_INPUT_LENGTH: usize = 10000;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = arbitrary::Unstructured::new(data).arbitrary::<JsonInput>() {
        query_expr::fuzz_helper::translate_json(&input.text);
    }
});
