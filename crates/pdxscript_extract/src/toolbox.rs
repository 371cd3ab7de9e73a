//! Value-level conversions.
//!
//! These work on a value node directly, for callers that have already
//! taken a statement apart (function-call arguments, list members).

use pdxscript_language::ValueId;

use crate::extractor::Extractor;

impl Extractor<'_> {
    /// Converts a literal or `-literal` value to an integer.
    pub fn try_int(&mut self, value: ValueId, action: &str) -> Option<i64> {
        let (text, token) = self.signed_literal(value, action)?;
        self.parse_int_text(&text, token, action)
    }

    /// Converts a literal or `-literal` value to a float.
    pub fn try_float(&mut self, value: ValueId, action: &str) -> Option<f64> {
        let (text, token) = self.signed_literal(value, action)?;
        self.parse_float_text(&text, token, action)
    }

    /// Converts a literal value to a boolean.
    pub fn try_bool(&mut self, value: ValueId, action: &str) -> Option<bool> {
        let token = self.literal(value, action)?;
        self.parse_bool_token(token, action)
    }
}
