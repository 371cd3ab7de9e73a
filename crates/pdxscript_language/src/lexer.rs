//! Lexer for pdxscript.
//!
//! The lexer converts source text into a stream of tokens. It never fails:
//! characters it does not recognize become [`TokenKind::Unexpected`] tokens
//! and scanning continues. Comments and whitespace produce no tokens.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Fewest year digits a date token may have.
///
/// `year.month.day` lexes as a [`TokenKind::Date`] only when the year has at
/// least this many digits, so `100.1.1` is a date while `99.1.1` and
/// `12.5.3` are numbers. Shorter three-group forms are ambiguous between a
/// date and a dotted number; they stay numbers and a date extractor may
/// still read them through `Date::parse`.
const MIN_DATE_YEAR_DIGITS: usize = 3;

/// Lexer for pdxscript source code.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    ///
    /// Once the input is exhausted this keeps returning [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::new(start, start, start_line, start_column),
            );
        };

        let (kind, lexeme_start, lexeme_end) = match c {
            '"' => self.scan_string(),
            '@' => self.scan_at(),
            c if c.is_ascii_digit() => (self.scan_number(), start, self.position),
            c if is_word_start(c) => (self.scan_word(), start, self.position),
            c => (self.scan_symbol(c), start, self.position),
        };

        let span = Span::new(lexeme_start, lexeme_end, start_line, start_column)
            .ending_at(self.line, self.column);
        Token::new(kind, span)
    }

    /// Tokenizes all source and returns a vector of tokens ending in
    /// [`TokenKind::Eof`].
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        Lexer::tokenize_into(source, &mut tokens);
        tokens
    }

    /// Tokenizes all source into `tokens`, replacing its contents.
    ///
    /// This lets callers reuse a buffer across files.
    pub fn tokenize_into(source: &str, tokens: &mut Vec<Token>) {
        tokens.clear();
        let mut lexer = Lexer::new(source);
        loop {
            let token = lexer.next_token();
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        log::debug!("lexed {} bytes into {} tokens", source.len(), tokens.len());
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks at the character `n` positions ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Advances while `predicate` holds for the next character.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Skips whitespace and `#` line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() || c == '\u{feff}' => self.advance(),
                Some('#') => self.advance_while(|c| c != '\n'),
                _ => break,
            }
        }
    }

    /// Scans a quoted string. The lexeme excludes the quotes.
    fn scan_string(&mut self) -> (TokenKind, usize, usize) {
        let start = self.position;
        self.advance(); // consume opening '"'
        let content_start = self.position;
        self.advance_while(|c| c != '"');
        if self.peek_char().is_none() {
            return (TokenKind::Unexpected, start, self.position);
        }
        let content_end = self.position;
        self.advance(); // consume closing '"'
        (TokenKind::String, content_start, content_end)
    }

    /// Scans `@[` or an at-identifier. The at-identifier lexeme excludes the `@`.
    fn scan_at(&mut self) -> (TokenKind, usize, usize) {
        let start = self.position;
        self.advance(); // consume '@'
        match self.peek_char() {
            Some('[') => {
                self.advance();
                (TokenKind::MathOpen, start, self.position)
            }
            Some(c) if is_word_start(c) => {
                let name_start = self.position;
                self.advance_while(is_word_continue);
                (TokenKind::AtIdentifier, name_start, self.position)
            }
            _ => (TokenKind::Unexpected, start, self.position),
        }
    }

    /// Scans a token that starts with a digit: a number, a date, or an
    /// identifier such as `1st_army`.
    ///
    /// Exactly two `.digits` groups after a year of at least three digits make
    /// a date, unless the token runs on into more word characters. Anything
    /// else is a number, including three or more groups.
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;
        self.advance_while(|c| c.is_ascii_digit());
        let year_digits = self.position - start;

        if self.peek_char().is_some_and(char::is_alphabetic) {
            self.advance_while(is_word_continue);
            return TokenKind::Identifier;
        }

        let mut groups = 0;
        while self.peek_char() == Some('.')
            && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // consume '.'
            self.advance_while(|c| c.is_ascii_digit());
            groups += 1;
        }

        if groups == 2
            && year_digits >= MIN_DATE_YEAR_DIGITS
            && !self.peek_char().is_some_and(is_word_continue)
        {
            TokenKind::Date
        } else {
            TokenKind::Number
        }
    }

    /// Scans an identifier or a `yes`/`no` keyword.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.position;
        self.advance_while(is_word_continue);
        match &self.source[start..self.position] {
            "yes" | "no" => TokenKind::Bool,
            _ => TokenKind::Identifier,
        }
    }

    /// Scans operators and delimiters.
    fn scan_symbol(&mut self, c: char) -> TokenKind {
        self.advance();
        let followed_by_equals = self.peek_char() == Some('=');
        let (single, double) = match c {
            '=' => (TokenKind::Equals, None),
            '!' => (TokenKind::Unexpected, Some(TokenKind::NotEquals)),
            '<' => (TokenKind::Less, Some(TokenKind::LessEquals)),
            '>' => (TokenKind::Greater, Some(TokenKind::GreaterEquals)),
            '?' => (TokenKind::Unexpected, Some(TokenKind::QuestionEquals)),
            '{' => (TokenKind::LeftBrace, None),
            '}' => (TokenKind::RightBrace, None),
            '[' => (TokenKind::LeftBracket, None),
            ']' => (TokenKind::RightBracket, None),
            '(' => (TokenKind::LeftParen, None),
            ')' => (TokenKind::RightParen, None),
            '+' => (TokenKind::Plus, None),
            '-' => (TokenKind::Minus, None),
            '*' => (TokenKind::Asterisk, None),
            '/' => (TokenKind::Slash, None),
            _ => (TokenKind::Unexpected, None),
        };
        match double {
            Some(kind) if followed_by_equals => {
                self.advance(); // consume '='
                kind
            }
            _ => single,
        }
    }
}

/// Returns true if `c` can start an identifier.
fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns true if `c` can appear in an identifier after the first character.
fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '.' | '|' | '-')
}
