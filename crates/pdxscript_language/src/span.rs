//! Source location tracking.
//!
//! `Span` tracks the position of tokens in source code for error reporting
//! and for re-deriving lexemes.

use pdxscript_foundation::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A span of source text.
///
/// `start..end` is the lexeme's byte range. For strings and at-identifiers it
/// excludes the quotes or the `@`, while `line`/`column` and
/// `end_line`/`end_column` always cover the whole token as written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Byte offset where the lexeme starts.
    pub start: usize,
    /// Byte offset where the lexeme ends (exclusive).
    pub end: usize,
    /// 1-based line number where the token starts.
    pub line: u32,
    /// 1-based column number where the token starts.
    pub column: u32,
    /// 1-based line number just after the token.
    pub end_line: u32,
    /// 1-based column number just after the token.
    pub end_column: u32,
}

impl Span {
    /// Creates a span for a token that starts and ends on the same line.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let width = (end - start) as u32;
        Self {
            start,
            end,
            line,
            column,
            end_line: line,
            end_column: column + width,
        }
    }

    /// Sets where the written token ends.
    #[must_use]
    pub const fn ending_at(mut self, line: u32, column: u32) -> Self {
        self.end_line = line;
        self.end_column = column;
        self
    }

    /// Creates an empty span at the start of input.
    #[must_use]
    pub const fn at_start() -> Self {
        Self::new(0, 0, 1, 1)
    }

    /// Returns the length of the lexeme in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the lexeme is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the text this span covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Position of the first character of the token.
    #[must_use]
    pub const fn start_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Position just after the last character of the token.
    #[must_use]
    pub const fn end_position(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }
}
