//! Statement-level extraction of primitive values.
//!
//! Each operation takes a content-pair statement such as `width = 1280`.

use pdxscript_foundation::{Date, DiagnosticCode};
use pdxscript_language::{StatementId, Token, TokenKind};

use crate::extractor::{Extractor, Separators};

/// Maps a script boolean lexeme to a `bool`.
#[must_use]
pub fn parse_bool(lexeme: &str) -> Option<bool> {
    match lexeme {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

impl Extractor<'_> {
    /// Extracts the lexeme of any literal value.
    pub fn string(&mut self, id: StatementId, action: &str) -> Option<String> {
        let value = self.content_value(id, Separators::Equals, action)?;
        let token = self.literal(value, action)?;
        Some(self.lexeme(token).to_string())
    }

    /// Extracts an identifier (or quoted identifier).
    pub fn identifier(&mut self, id: StatementId, action: &str) -> Option<String> {
        let value = self.content_value(id, Separators::Equals, action)?;
        let token = self.literal(value, action)?;
        self.identifier_token(token, action)
    }

    /// Requires `token` to be an identifier or a string.
    pub(crate) fn identifier_token(&mut self, token: Token, action: &str) -> Option<String> {
        if matches!(token.kind, TokenKind::Identifier | TokenKind::String) {
            return Some(self.lexeme(token).to_string());
        }
        let found = self.describe(token);
        self.report(
            token.start(),
            DiagnosticCode::ExpectedIdentifier,
            action,
            &[&found],
        );
        None
    }

    /// Extracts an integer. Accepts `=` and the ordering comparisons, so
    /// conditions such as `value >= 5` extract too.
    pub fn int(&mut self, id: StatementId, action: &str) -> Option<i64> {
        let value = self.content_value(id, Separators::Comparable, action)?;
        let (text, token) = self.signed_literal(value, action)?;
        self.parse_int_text(&text, token, action)
    }

    /// Extracts a floating-point number, with the same separators as
    /// [`Extractor::int`].
    pub fn float(&mut self, id: StatementId, action: &str) -> Option<f64> {
        let value = self.content_value(id, Separators::Comparable, action)?;
        let (text, token) = self.signed_literal(value, action)?;
        self.parse_float_text(&text, token, action)
    }

    /// Extracts `yes` or `no`.
    pub fn bool(&mut self, id: StatementId, action: &str) -> Option<bool> {
        let value = self.content_value(id, Separators::Equals, action)?;
        let token = self.literal(value, action)?;
        self.parse_bool_token(token, action)
    }

    /// Extracts a boolean, substituting `default` after reporting a failure.
    pub fn bool_or(&mut self, id: StatementId, default: bool, action: &str) -> bool {
        self.bool(id, action).unwrap_or(default)
    }

    /// Extracts a `year.month.day` date.
    pub fn date(&mut self, id: StatementId, action: &str) -> Option<Date> {
        let value = self.content_value(id, Separators::Equals, action)?;
        let token = self.literal(value, action)?;
        let lexeme = self.lexeme(token);
        let date = matches!(token.kind, TokenKind::Date | TokenKind::Number)
            .then(|| Date::parse(lexeme))
            .flatten();
        if date.is_none() {
            self.report(
                token.start(),
                DiagnosticCode::InvalidDateValue,
                action,
                &[&lexeme],
            );
        }
        date
    }

    // =========================================================================
    // Lexeme conversion
    // =========================================================================

    /// Converts signed text read from a number token.
    pub(crate) fn parse_int_text(&mut self, text: &str, token: Token, action: &str) -> Option<i64> {
        let parsed = (token.kind == TokenKind::Number)
            .then(|| text.parse::<i64>().ok())
            .flatten();
        if parsed.is_none() {
            self.report(
                token.start(),
                DiagnosticCode::InvalidIntegerValue,
                action,
                &[&text],
            );
        }
        parsed
    }

    /// Converts signed text read from a number token.
    pub(crate) fn parse_float_text(&mut self, text: &str, token: Token, action: &str) -> Option<f64> {
        let parsed = (token.kind == TokenKind::Number)
            .then(|| text.parse::<f64>().ok())
            .flatten();
        if parsed.is_none() {
            self.report(
                token.start(),
                DiagnosticCode::InvalidFloatValue,
                action,
                &[&text],
            );
        }
        parsed
    }

    /// Converts a boolean token.
    pub(crate) fn parse_bool_token(&mut self, token: Token, action: &str) -> Option<bool> {
        let lexeme = self.lexeme(token);
        let parsed = parse_bool(lexeme);
        if parsed.is_none() {
            self.report(
                token.start(),
                DiagnosticCode::InvalidBoolValue,
                action,
                &[&lexeme],
            );
        }
        parsed
    }
}
