//! Token types for pdxscript.
//!
//! Tokens are the output of the lexer and input to the parser. They carry no
//! text of their own; the lexeme is recovered from the source through the
//! token's [`Span`].

use pdxscript_foundation::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// The lexical category of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the lexeme this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Position of the first character of the token.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.span.start_position()
    }

    /// Position just after the token.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.span.end_position()
    }

    /// Returns true if this token is `kind`.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Lexical categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    // Words and literals
    /// `width`, `scripted_trigger`, `1st_army`, `culture:french`
    Identifier,
    /// `@constant`; the lexeme excludes the `@`
    AtIdentifier,
    /// `1280`, `12.5`
    Number,
    /// `1444.11.11`
    Date,
    /// `"text"`; the lexeme excludes the quotes
    String,
    /// `yes` or `no`
    Bool,

    // Separators
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `<`
    Less,
    /// `<=`
    LessEquals,
    /// `>`
    Greater,
    /// `>=`
    GreaterEquals,
    /// `?=`
    QuestionEquals,

    // Delimiters
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `@[`
    MathOpen,
    /// `[`
    LeftBracket,
    /// `]`, which also closes a math expression
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,

    // Arithmetic
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Asterisk,
    /// `/`
    Slash,

    // Meta
    /// Unrecognized character or unterminated string
    Unexpected,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns true for `=` and the comparison operators.
    #[must_use]
    pub const fn is_separator(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::NotEquals
                | Self::Less
                | Self::LessEquals
                | Self::Greater
                | Self::GreaterEquals
                | Self::QuestionEquals
        )
    }

    /// Returns true for `<`, `<=`, `>`, `>=`.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(
            self,
            Self::Less | Self::LessEquals | Self::Greater | Self::GreaterEquals
        )
    }

    /// Returns true for the kinds that may start a keyed statement.
    #[must_use]
    pub const fn is_statement_key(self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::Date | Self::Number | Self::String
        )
    }

    /// Returns true for the kinds a literal value may have.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::Number
                | Self::String
                | Self::Bool
                | Self::Identifier
                | Self::Date
                | Self::AtIdentifier
        )
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::AtIdentifier => "@identifier",
            Self::Number => "number",
            Self::Date => "date",
            Self::String => "string",
            Self::Bool => "boolean",
            Self::Equals => "'='",
            Self::NotEquals => "'!='",
            Self::Less => "'<'",
            Self::LessEquals => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEquals => "'>='",
            Self::QuestionEquals => "'?='",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::MathOpen => "'@['",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Asterisk => "'*'",
            Self::Slash => "'/'",
            Self::Unexpected => "unexpected character",
            Self::Eof => "end of input",
        }
    }
}
