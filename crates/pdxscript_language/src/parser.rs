//! Parser for pdxscript.
//!
//! The parser turns a token sequence into a syntax tree. The grammar has
//! almost no reserved words, so statement shapes are told apart by looking up
//! to three tokens ahead. `Unexpected` tokens from the lexer are skipped
//! before every lookahead and consumption.
//!
//! A grammar violation aborts the whole parse with an [`Error`]. There is no
//! statement-level recovery; [`parse_document`] turns the error into
//! diagnostics and an empty tree.

use pdxscript_foundation::{
    DiagnosticCode, DiagnosticContext, Error, ErrorKind, Position, Result,
};

use crate::arena::{Arena, StatementId, ValueId};
use crate::ast::{BlockStatement, BlockValue, Document, FunctionCall, MathExpression, Root, ScriptedStatement};
use crate::config::ParseConfig;
use crate::lexer::Lexer;
use crate::pool::TokenPool;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Action name used for diagnostics reported while parsing.
pub const PARSE_ACTION: &str = "parser.parse_document";

/// Parser for one file's token sequence.
pub struct Parser<'src, 't> {
    /// Source text the tokens point into.
    source: &'src str,
    /// Token sequence ending in `Eof`.
    tokens: &'t [Token],
    /// Index of the next unconsumed token.
    cursor: usize,
    /// The terminating `Eof`, returned whenever the cursor runs off the end.
    eof: Token,
    /// Nodes built so far.
    arena: Arena,
    /// Parser settings.
    config: &'t ParseConfig,
    /// Current nesting depth.
    depth: usize,
}

impl<'src, 't> Parser<'src, 't> {
    /// Creates a parser over `tokens`, which must come from lexing `source`.
    #[must_use]
    pub fn new(source: &'src str, tokens: &'t [Token], config: &'t ParseConfig) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => *last,
            _ => {
                let (line, column) = end_of(source);
                Token::new(
                    TokenKind::Eof,
                    Span::new(source.len(), source.len(), line, column),
                )
            }
        };
        Self {
            source,
            tokens,
            cursor: 0,
            eof,
            arena: Arena::with_capacity(tokens.len()),
            config,
            depth: 0,
        }
    }

    /// Parses every top-level statement.
    ///
    /// # Errors
    /// Returns a syntax error at the first token that fits no grammar rule.
    pub fn parse(mut self) -> Result<Document<'src>> {
        let mut statements = Vec::new();
        while self.current().kind != TokenKind::Eof {
            statements.push(self.parse_statement()?);
        }
        log::debug!(
            "parsed {} top-level statements ({} nodes)",
            statements.len(),
            self.arena.statement_count() + self.arena.value_count()
        );
        Ok(Document::new(self.source, self.arena, Root { statements }))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parses one statement.
    fn parse_statement(&mut self) -> Result<StatementId> {
        let token = self.current();
        match token.kind {
            TokenKind::LeftBrace => self.parse_anonymous_block(),
            TokenKind::Minus => self.parse_unary_statement(),
            TokenKind::AtIdentifier => self.parse_content_or_block(),
            kind if kind.is_statement_key() => {
                if self.at_scripted_header() {
                    return self.parse_scripted();
                }
                let next = self.peek(1).kind;
                if next == TokenKind::LeftBrace {
                    self.parse_named_block()
                } else if next.is_separator() {
                    self.parse_content_or_block()
                } else {
                    let key = self.bump();
                    Ok(self.arena.alloc_key_only(key))
                }
            }
            _ => Err(self.unexpected("a statement")),
        }
    }

    /// Returns true at `keyword name =` where `keyword` is a scripted keyword.
    fn at_scripted_header(&self) -> bool {
        let keyword = self.current();
        keyword.kind == TokenKind::Identifier
            && self.peek(1).kind == TokenKind::Identifier
            && self.peek(2).kind == TokenKind::Equals
            && self.config.is_scripted_keyword(keyword.text(self.source))
    }

    /// Parses `{ statements }` in statement position.
    fn parse_anonymous_block(&mut self) -> Result<StatementId> {
        let open = self.bump();
        let (children, close) = self.parse_body(open)?;
        Ok(self.arena.alloc_block(BlockStatement {
            key: open,
            separator: None,
            open,
            children,
            close,
        }))
    }

    /// Parses `key { statements }`.
    fn parse_named_block(&mut self) -> Result<StatementId> {
        let key = self.bump();
        let open = self.bump();
        let (children, close) = self.parse_body(open)?;
        Ok(self.arena.alloc_block(BlockStatement {
            key,
            separator: None,
            open,
            children,
            close,
        }))
    }

    /// Parses `key op value` or `key op { statements }`.
    fn parse_content_or_block(&mut self) -> Result<StatementId> {
        let key = self.bump();
        if !self.current().kind.is_separator() {
            return Err(self.unexpected("'=' or a comparison operator"));
        }
        let separator = self.bump();

        if self.current().kind == TokenKind::LeftBrace {
            let open = self.bump();
            let (children, close) = self.parse_body(open)?;
            return Ok(self.arena.alloc_block(BlockStatement {
                key,
                separator: Some(separator),
                open,
                children,
                close,
            }));
        }

        let value = self.parse_value()?;
        Ok(self.arena.alloc_content(key, separator, value))
    }

    /// Parses `keyword name = { statements }`.
    fn parse_scripted(&mut self) -> Result<StatementId> {
        let keyword = self.bump();
        let name = self.bump();
        let separator = self.bump();
        let open = self.expect(TokenKind::LeftBrace)?;
        let (children, close) = self.parse_body(open)?;
        Ok(self.arena.alloc_scripted(ScriptedStatement {
            keyword,
            name,
            separator,
            open,
            children,
            close,
        }))
    }

    /// Parses a bare negative list element such as `-1`.
    fn parse_unary_statement(&mut self) -> Result<StatementId> {
        let operator = self.current();
        let value = self.parse_value()?;
        Ok(self.arena.alloc_unary_statement(operator, value))
    }

    /// Parses statements up to the matching `}` (already past `open`).
    ///
    /// Running into end of input leaves the block unclosed rather than failing.
    fn parse_body(&mut self, open: Token) -> Result<(Vec<StatementId>, Option<Token>)> {
        self.descend(open)?;
        let mut children = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::RightBrace => {
                    let close = self.bump();
                    self.ascend();
                    return Ok((children, Some(close)));
                }
                TokenKind::Eof => {
                    self.ascend();
                    return Ok((children, None));
                }
                _ => children.push(self.parse_statement()?),
            }
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Parses one value.
    fn parse_value(&mut self) -> Result<ValueId> {
        let token = self.current();
        match token.kind {
            TokenKind::Minus => {
                let operator = self.bump();
                self.descend(operator)?;
                let operand = self.parse_value()?;
                self.ascend();
                Ok(self.arena.alloc_unary(operator, operand))
            }
            TokenKind::Identifier if self.peek(1).kind == TokenKind::LeftBrace => {
                self.parse_function_call()
            }
            TokenKind::LeftBrace => {
                let open = self.bump();
                let (children, close) = self.parse_body(open)?;
                Ok(self.arena.alloc_block_value(BlockValue {
                    open,
                    children,
                    close,
                }))
            }
            TokenKind::MathOpen => Ok(self.parse_math()),
            kind if kind.is_literal() => {
                let token = self.bump();
                Ok(self.arena.alloc_literal(token))
            }
            _ => Err(self.unexpected("a value")),
        }
    }

    /// Parses `name { value value ... }`.
    fn parse_function_call(&mut self) -> Result<ValueId> {
        let name = self.bump();
        let open = self.bump();
        self.descend(open)?;
        let mut arguments = Vec::new();
        let close = loop {
            match self.current().kind {
                TokenKind::RightBrace => break Some(self.bump()),
                TokenKind::Eof => break None,
                _ => arguments.push(self.parse_value()?),
            }
        };
        self.ascend();
        Ok(self.arena.alloc_function_call(FunctionCall {
            name,
            open,
            arguments,
            close,
        }))
    }

    /// Captures the raw tokens of `@[ ... ]` without interpreting them.
    ///
    /// Nested `[`/`@[` must be balanced before the closing `]`.
    fn parse_math(&mut self) -> ValueId {
        let open = self.bump();
        let mut tokens = Vec::new();
        let mut nesting = 0usize;
        let close = loop {
            let token = self.tokens.get(self.cursor).copied().unwrap_or(self.eof);
            match token.kind {
                TokenKind::Eof => break None,
                TokenKind::RightBracket if nesting == 0 => {
                    self.cursor += 1;
                    break Some(token);
                }
                TokenKind::RightBracket => nesting -= 1,
                TokenKind::LeftBracket | TokenKind::MathOpen => nesting += 1,
                _ => {}
            }
            tokens.push(token);
            self.cursor += 1;
        };
        self.arena.alloc_math(MathExpression {
            open,
            tokens,
            close,
        })
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    /// Advances past any `Unexpected` tokens.
    fn skip_unexpected(&mut self) {
        while self
            .tokens
            .get(self.cursor)
            .is_some_and(|t| t.kind == TokenKind::Unexpected)
        {
            self.cursor += 1;
        }
    }

    /// Returns the `n`-th upcoming token, not counting `Unexpected` ones.
    fn peek(&self, n: usize) -> Token {
        self.tokens
            .get(self.cursor..)
            .unwrap_or_default()
            .iter()
            .filter(|t| t.kind != TokenKind::Unexpected)
            .nth(n)
            .copied()
            .unwrap_or(self.eof)
    }

    /// Returns the current token.
    fn current(&self) -> Token {
        self.peek(0)
    }

    /// Consumes and returns the current token. `Eof` is never consumed.
    fn bump(&mut self) -> Token {
        self.skip_unexpected();
        let token = self.tokens.get(self.cursor).copied().unwrap_or(self.eof);
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    /// Consumes a token of kind `expected` or fails.
    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        if self.current().kind == expected {
            Ok(self.bump())
        } else {
            Err(self.unexpected(expected.name()))
        }
    }

    /// Enters one nesting level.
    fn descend(&mut self, at: Token) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(Error::nesting_too_deep(self.config.max_depth, at.start()));
        }
        Ok(())
    }

    /// Leaves one nesting level.
    fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// Creates a syntax error at the current token.
    fn unexpected(&self, expected: &str) -> Error {
        let token = self.current();
        let found = match token.kind {
            TokenKind::Eof => token.kind.name().to_string(),
            _ => format!("'{}'", token.text(self.source)),
        };
        Error::syntax(expected, found, token.start(), self.line_at(token.span))
    }

    /// Gets the source line containing a span, for error messages.
    fn line_at(&self, span: Span) -> String {
        let start = span.start.min(self.source.len());
        let line_start = self.source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.source[start..]
            .find('\n')
            .map_or(self.source.len(), |i| start + i);
        self.source[line_start..line_end].to_string()
    }
}

/// Line and column just past the end of `source`.
fn end_of(source: &str) -> (u32, u32) {
    let mut lexer = Lexer::new(source);
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            return (token.span.line, token.span.column);
        }
    }
}

/// Parses source code with the default configuration.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Document<'_>> {
    let tokens = Lexer::tokenize_all(source);
    let config = ParseConfig::default();
    Parser::new(source, &tokens, &config).parse()
}

/// Lexes and parses one file, reporting problems through `cx`.
///
/// This never fails. Input holding only whitespace and comments yields an
/// empty document and an [`DiagnosticCode::EmptyFile`] warning. A syntax error is reported once,
/// followed by one [`DiagnosticCode::FileParseFailed`], and yields an empty
/// document.
pub fn parse_document<'src>(
    source: &'src str,
    cx: &mut DiagnosticContext<'_>,
    config: &ParseConfig,
    pool: &TokenPool,
) -> Document<'src> {
    let label = cx.file().unwrap_or("<input>").to_string();
    let mut tokens = pool.acquire();
    Lexer::tokenize_into(source, &mut tokens);

    match Parser::new(source, &tokens, config).parse() {
        Ok(document) => {
            let blank = tokens.iter().all(|token| token.kind == TokenKind::Eof);
            if document.root.is_empty() && blank && config.report_empty_file {
                cx.set_position(Position::start());
                cx.report(DiagnosticCode::EmptyFile, PARSE_ACTION, &[&label]);
            }
            document
        }
        Err(error) => {
            log::warn!("{label}: {error}");
            let at = error.position().unwrap_or_default();
            cx.set_position(at);
            match &error.kind {
                ErrorKind::Syntax {
                    expected, found, ..
                } => cx.report(DiagnosticCode::UnexpectedToken, PARSE_ACTION, &[expected, found]),
                ErrorKind::NestingTooDeep { limit, .. } => {
                    cx.report(DiagnosticCode::NestingTooDeep, PARSE_ACTION, &[limit]);
                }
                ErrorKind::Io { .. } | ErrorKind::Internal(_) => {}
            }
            cx.report(DiagnosticCode::FileParseFailed, PARSE_ACTION, &[&label, &error]);
            Document::empty(source)
        }
    }
}
