//! Color extraction.
//!
//! A color is either a symbolic key (`color = dark_blue`) or one of the
//! function-call forms `rgb { r g b [a] }`, `hsv { h s v }` and
//! `hsv360 { h s v }`.

use pdxscript_foundation::{Color, DiagnosticCode};
use pdxscript_language::{FunctionCall, Statement, StatementId, TokenKind, Value, ValueId};

use crate::extractor::{Extractor, Separators};
use crate::registry::RegistryKind;

/// Accepted color forms, as listed in diagnostics.
pub const ACCEPTED_COLOR_FORMS: &str =
    "a named color, rgb { r g b [a] }, hsv { h s v }, hsv360 { h s v }";

impl Extractor<'_> {
    /// Extracts a color from `key = <color>`.
    pub fn color(&mut self, id: StatementId, action: &str) -> Option<Color> {
        let document = self.document;
        let statement = document.statement(id);
        let Statement::Content(content) = statement else {
            self.report(
                document.start(id),
                DiagnosticCode::InvalidColorMarkup,
                action,
                &[&statement.kind_name(), &ACCEPTED_COLOR_FORMS],
            );
            return None;
        };
        self.separator(content, Separators::Equals, action)?;
        self.color_value(content.value, action)
    }

    /// Extracts a color from a value node.
    pub fn color_value(&mut self, value: ValueId, action: &str) -> Option<Color> {
        let document = self.document;
        match document.value(value) {
            Value::Literal(token) if matches!(token.kind, TokenKind::Identifier | TokenKind::String) => {
                let key = self.resolve_token(*token, RegistryKind::NamedColor, action)?;
                Some(Color::Named(key.key))
            }
            Value::FunctionCall(call) => self.color_call(call, action),
            Value::Literal(token) => {
                let found = self.describe(*token);
                self.report(
                    token.start(),
                    DiagnosticCode::InvalidColorMarkup,
                    action,
                    &[&found, &ACCEPTED_COLOR_FORMS],
                );
                None
            }
            other => {
                self.report(
                    document.arena.value_start(value),
                    DiagnosticCode::InvalidColorMarkup,
                    action,
                    &[&other.kind_name(), &ACCEPTED_COLOR_FORMS],
                );
                None
            }
        }
    }

    fn color_call(&mut self, call: &FunctionCall, action: &str) -> Option<Color> {
        let name = self.lexeme(call.name);
        let args = call.arguments.as_slice();
        match (name.to_ascii_lowercase().as_str(), args) {
            ("rgb", [r, g, b]) => Some(Color::Rgb {
                r: self.byte_component(*r, "r", action)?,
                g: self.byte_component(*g, "g", action)?,
                b: self.byte_component(*b, "b", action)?,
                a: u8::MAX,
            }),
            ("rgb", [r, g, b, a]) => Some(Color::Rgb {
                r: self.byte_component(*r, "r", action)?,
                g: self.byte_component(*g, "g", action)?,
                b: self.byte_component(*b, "b", action)?,
                a: self.byte_component(*a, "a", action)?,
            }),
            ("hsv", [h, s, v]) => Some(Color::Hsv {
                h: self.scaled_component(*h, "h", 1.0, action)?,
                s: self.scaled_component(*s, "s", 1.0, action)?,
                v: self.scaled_component(*v, "v", 1.0, action)?,
            }),
            ("hsv360", [h, s, v]) => Some(Color::Hsv {
                h: self.scaled_component(*h, "h", 360.0, action)? / 360.0,
                s: self.scaled_component(*s, "s", 100.0, action)? / 100.0,
                v: self.scaled_component(*v, "v", 100.0, action)? / 100.0,
            }),
            _ => {
                let found = format!("'{name}' with {} component(s)", args.len());
                self.report(
                    call.name.start(),
                    DiagnosticCode::InvalidColorMarkup,
                    action,
                    &[&found, &ACCEPTED_COLOR_FORMS],
                );
                None
            }
        }
    }

    /// Reads an integer component in `0..=255`.
    fn byte_component(&mut self, value: ValueId, component: &str, action: &str) -> Option<u8> {
        let (text, is_number) = self.component_text(value);
        let byte = is_number
            .then(|| text.parse::<i64>().ok())
            .flatten()
            .and_then(|n| u8::try_from(n).ok());
        if byte.is_none() {
            self.report(
                self.document.arena.value_start(value),
                DiagnosticCode::InvalidColorValue,
                action,
                &[&component, &text, &"0..=255"],
            );
        }
        byte
    }

    /// Reads a number component in `0..=max`.
    fn scaled_component(&mut self, value: ValueId, component: &str, max: f64, action: &str) -> Option<f64> {
        let (text, is_number) = self.component_text(value);
        let number = is_number
            .then(|| text.parse::<f64>().ok())
            .flatten()
            .filter(|n| (0.0..=max).contains(n));
        if number.is_none() {
            let range = format!("0..={max}");
            self.report(
                self.document.arena.value_start(value),
                DiagnosticCode::InvalidColorValue,
                action,
                &[&component, &text, &range],
            );
        }
        number
    }

    /// The signed text of a component and whether it is numeric.
    fn component_text(&self, value: ValueId) -> (String, bool) {
        let document = self.document;
        match document.value(value) {
            Value::Literal(token) => (self.lexeme(*token).to_string(), token.kind == TokenKind::Number),
            Value::Unary(unary) => match document.value(unary.operand) {
                Value::Literal(token) => (
                    format!("-{}", self.lexeme(*token)),
                    token.kind == TokenKind::Number,
                ),
                other => (other.kind_name().to_string(), false),
            },
            other => (other.kind_name().to_string(), false),
        }
    }
}
