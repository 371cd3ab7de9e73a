//! The extraction handle and its shape checks.
//!
//! Every extraction operation follows one contract: check the node's shape,
//! convert its lexeme, and on any failure report exactly one diagnostic and
//! return `None`. Callers fold the `Option`s into a
//! [`Validity`](crate::Validity) instead of stopping at the first failure.

use std::fmt;

use pdxscript_foundation::{DiagnosticCode, DiagnosticContext, Position};
use pdxscript_language::{ContentStatement, Document, Statement, StatementId, Token, TokenKind, Value, ValueId};

use crate::config::ExtractConfig;
use crate::registry::Resolver;

/// Which separators an operation accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Separators {
    /// Only `=`.
    Equals,
    /// `=` or one of `<`, `<=`, `>`, `>=`.
    Comparable,
}

impl Separators {
    /// Returns true if `kind` is accepted.
    #[must_use]
    pub const fn accepts(self, kind: TokenKind) -> bool {
        match self {
            Self::Equals => matches!(kind, TokenKind::Equals),
            Self::Comparable => matches!(kind, TokenKind::Equals) || kind.is_ordering(),
        }
    }

    /// The accepted separators, as listed in diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Equals => "'='",
            Self::Comparable => "'=', '<', '<=', '>' or '>='",
        }
    }
}

/// Extraction state for one document.
///
/// Owns the file's [`DiagnosticContext`] for the duration of extraction;
/// [`Extractor::finish`] hands it back.
pub struct Extractor<'a> {
    pub(crate) document: &'a Document<'a>,
    pub(crate) cx: DiagnosticContext<'a>,
    pub(crate) resolver: &'a dyn Resolver,
    pub(crate) config: ExtractConfig,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor over `document`.
    #[must_use]
    pub fn new(
        document: &'a Document<'a>,
        cx: DiagnosticContext<'a>,
        resolver: &'a dyn Resolver,
        config: ExtractConfig,
    ) -> Self {
        Self {
            document,
            cx,
            resolver,
            config,
        }
    }

    /// The document being extracted.
    #[must_use]
    pub const fn document(&self) -> &'a Document<'a> {
        self.document
    }

    /// The diagnostic context.
    pub fn context(&mut self) -> &mut DiagnosticContext<'a> {
        &mut self.cx
    }

    /// The injected resolver.
    #[must_use]
    pub fn resolver(&self) -> &'a dyn Resolver {
        self.resolver
    }

    /// Ends extraction and returns the diagnostic context.
    #[must_use]
    pub fn finish(self) -> DiagnosticContext<'a> {
        self.cx
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Moves the context to `at` and reports one diagnostic.
    pub(crate) fn report(
        &mut self,
        at: Position,
        code: DiagnosticCode,
        action: &str,
        args: &[&dyn fmt::Display],
    ) {
        self.cx.set_position(at);
        self.cx.report(code, action, args);
    }

    /// The lexeme of a token.
    pub(crate) fn lexeme(&self, token: Token) -> &'a str {
        self.document.lexeme(token)
    }

    /// A token as shown in diagnostics: its quoted lexeme, or its kind name.
    pub(crate) fn describe(&self, token: Token) -> String {
        match token.kind {
            TokenKind::Eof => token.kind.name().to_string(),
            _ => format!("'{}'", self.lexeme(token)),
        }
    }

    // =========================================================================
    // Shape checks
    // =========================================================================

    /// Requires `id` to be a content pair.
    pub(crate) fn content(&mut self, id: StatementId, action: &str) -> Option<&'a ContentStatement> {
        let document = self.document;
        match document.statement(id) {
            Statement::Content(content) => Some(content),
            other => {
                self.report(
                    document.start(id),
                    DiagnosticCode::InvalidNodeType,
                    action,
                    &[&"a content pair", &other.kind_name()],
                );
                None
            }
        }
    }

    /// Requires the separator of `content` to be one of `accepted`.
    pub(crate) fn separator(
        &mut self,
        content: &ContentStatement,
        accepted: Separators,
        action: &str,
    ) -> Option<()> {
        if accepted.accepts(content.separator.kind) {
            return Some(());
        }
        let found = self.lexeme(content.separator);
        self.report(
            content.separator.start(),
            DiagnosticCode::InvalidSeparator,
            action,
            &[&accepted.describe(), &found],
        );
        None
    }

    /// Requires `id` to be a content pair with an accepted separator and
    /// returns its value.
    pub(crate) fn content_value(
        &mut self,
        id: StatementId,
        accepted: Separators,
        action: &str,
    ) -> Option<ValueId> {
        let content = self.content(id, action)?;
        self.separator(content, accepted, action)?;
        Some(content.value)
    }

    /// Requires `value` to be a literal.
    pub(crate) fn literal(&mut self, value: ValueId, action: &str) -> Option<Token> {
        let document = self.document;
        match document.value(value) {
            Value::Literal(token) => Some(*token),
            other => {
                self.report(
                    document.arena.value_start(value),
                    DiagnosticCode::InvalidNodeType,
                    action,
                    &[&"a literal", &other.kind_name()],
                );
                None
            }
        }
    }

    /// Requires `value` to be a literal or a `-` applied to a literal.
    ///
    /// Returns the text to convert, with the sign prepended, and the literal
    /// token. Both integer paths and both float paths read numbers through
    /// this helper so they agree on signed values.
    pub(crate) fn signed_literal(&mut self, value: ValueId, action: &str) -> Option<(String, Token)> {
        let document = self.document;
        match document.value(value) {
            Value::Literal(token) => Some((self.lexeme(*token).to_string(), *token)),
            Value::Unary(unary) => match document.value(unary.operand) {
                Value::Literal(token) => Some((format!("-{}", self.lexeme(*token)), *token)),
                other => {
                    self.report(
                        document.arena.value_start(unary.operand),
                        DiagnosticCode::InvalidNodeType,
                        action,
                        &[&"a literal", &other.kind_name()],
                    );
                    None
                }
            },
            other => {
                self.report(
                    document.arena.value_start(value),
                    DiagnosticCode::InvalidNodeType,
                    action,
                    &[&"a literal or signed literal", &other.kind_name()],
                );
                None
            }
        }
    }
}

impl fmt::Debug for Extractor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("cx", &self.cx)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
