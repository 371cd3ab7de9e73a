//! Syntax tree for pdxscript.
//!
//! Nodes live in an [`Arena`] and refer to each other through
//! [`StatementId`]/[`ValueId`] handles. Every node keeps copies of the tokens
//! it was built from, so lexemes and positions can be recovered from the
//! source without the token buffer.

use pdxscript_foundation::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arena::{Arena, StatementId, ValueId};
use crate::token::Token;

// =============================================================================
// Statements
// =============================================================================

/// A statement node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Statement {
    /// `key = { ... }`, `key { ... }`, or an anonymous `{ ... }`
    Block(BlockStatement),
    /// `key = value`, `key >= value`, ...
    Content(ContentStatement),
    /// A bare `key` inside a list
    KeyOnly(KeyOnlyStatement),
    /// `scripted_trigger name = { ... }`
    Scripted(ScriptedStatement),
    /// A negative list element such as `-1`
    Unary(UnaryStatement),
}

/// A named or anonymous block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockStatement {
    /// The name token, or the opening brace for anonymous blocks.
    pub key: Token,
    /// The separator for `key = { ... }` forms.
    pub separator: Option<Token>,
    /// The opening brace.
    pub open: Token,
    /// Child statements in source order.
    pub children: Vec<StatementId>,
    /// The closing brace, if the block was closed before end of input.
    pub close: Option<Token>,
}

impl BlockStatement {
    /// Returns true for `{ ... }` blocks with no name.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.key == self.open
    }
}

/// A key, separator, and value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentStatement {
    /// The key.
    pub key: Token,
    /// `=` or a comparison operator.
    pub separator: Token,
    /// The value.
    pub value: ValueId,
}

/// A key with no value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyOnlyStatement {
    /// The key.
    pub key: Token,
}

/// A block with a two-token header.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScriptedStatement {
    /// `scripted_trigger` or `scripted_effect`.
    pub keyword: Token,
    /// The name being defined.
    pub name: Token,
    /// The `=`.
    pub separator: Token,
    /// The opening brace.
    pub open: Token,
    /// Child statements in source order.
    pub children: Vec<StatementId>,
    /// The closing brace, if the block was closed before end of input.
    pub close: Option<Token>,
}

/// A unary value used as a list element.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryStatement {
    /// The operator token, which doubles as the statement key.
    pub operator: Token,
    /// The [`Value::Unary`] node.
    pub value: ValueId,
}

impl Statement {
    /// The token that names or locates this statement.
    #[must_use]
    pub const fn key(&self) -> Token {
        match self {
            Self::Block(block) => block.key,
            Self::Content(content) => content.key,
            Self::KeyOnly(key_only) => key_only.key,
            Self::Scripted(scripted) => scripted.keyword,
            Self::Unary(unary) => unary.operator,
        }
    }

    /// The separator token, for statements that have one.
    #[must_use]
    pub const fn separator(&self) -> Option<Token> {
        match self {
            Self::Block(block) => block.separator,
            Self::Content(content) => Some(content.separator),
            Self::Scripted(scripted) => Some(scripted.separator),
            Self::KeyOnly(_) | Self::Unary(_) => None,
        }
    }

    /// Child statements of block-like statements.
    #[must_use]
    pub fn children(&self) -> &[StatementId] {
        match self {
            Self::Block(block) => &block.children,
            Self::Scripted(scripted) => &scripted.children,
            Self::Content(_) | Self::KeyOnly(_) | Self::Unary(_) => &[],
        }
    }

    /// The value of content pairs and unary statements.
    #[must_use]
    pub const fn value(&self) -> Option<ValueId> {
        match self {
            Self::Content(content) => Some(content.value),
            Self::Unary(unary) => Some(unary.value),
            Self::Block(_) | Self::KeyOnly(_) | Self::Scripted(_) => None,
        }
    }

    /// A human-readable name for this statement kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Block(_) => "block",
            Self::Content(_) => "content pair",
            Self::KeyOnly(_) => "key-only entry",
            Self::Scripted(_) => "scripted statement",
            Self::Unary(_) => "unary statement",
        }
    }

    /// Returns the content pair, or None.
    #[must_use]
    pub const fn as_content(&self) -> Option<&ContentStatement> {
        match self {
            Self::Content(content) => Some(content),
            _ => None,
        }
    }

    /// Returns the block, or None.
    #[must_use]
    pub const fn as_block(&self) -> Option<&BlockStatement> {
        match self {
            Self::Block(block) => Some(block),
            _ => None,
        }
    }
}

// =============================================================================
// Values
// =============================================================================

/// A value node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// A single number, string, boolean, identifier, or date token
    Literal(Token),
    /// `name { arg arg ... }`
    FunctionCall(FunctionCall),
    /// `{ statements }` in value position
    Block(BlockValue),
    /// `@[ ... ]`, captured without interpretation
    Math(MathExpression),
    /// `-value`
    Unary(UnaryValue),
}

/// A function-call value such as `rgb { 10 20 30 }`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionCall {
    /// The function name.
    pub name: Token,
    /// The opening brace.
    pub open: Token,
    /// Argument values in source order.
    pub arguments: Vec<ValueId>,
    /// The closing brace, if present.
    pub close: Option<Token>,
}

/// An anonymous block in value position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockValue {
    /// The opening brace.
    pub open: Token,
    /// Child statements in source order.
    pub children: Vec<StatementId>,
    /// The closing brace, if present.
    pub close: Option<Token>,
}

/// A math expression, kept as the raw token run between `@[` and `]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MathExpression {
    /// The `@[` token.
    pub open: Token,
    /// Every token between the markers, unexpected ones included.
    pub tokens: Vec<Token>,
    /// The matching `]`, if present.
    pub close: Option<Token>,
}

/// A prefix operator applied to a value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryValue {
    /// The operator, currently always `-`.
    pub operator: Token,
    /// The operand.
    pub operand: ValueId,
}

impl Value {
    /// A human-readable name for this value kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::FunctionCall(_) => "function call",
            Self::Block(_) => "block value",
            Self::Math(_) => "math expression",
            Self::Unary(_) => "unary expression",
        }
    }

    /// Returns the literal token, or None.
    #[must_use]
    pub const fn as_literal(&self) -> Option<Token> {
        match self {
            Self::Literal(token) => Some(*token),
            _ => None,
        }
    }

    /// Returns the function call, or None.
    #[must_use]
    pub const fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Self::FunctionCall(call) => Some(call),
            _ => None,
        }
    }
}

// =============================================================================
// Root and Document
// =============================================================================

/// The top of a syntax tree.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Root {
    /// Top-level statements in source order.
    pub statements: Vec<StatementId>,
}

impl Root {
    /// Creates an empty root.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    /// Returns true if there are no top-level statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A parsed file: its source text, the arena owning its nodes, and the root.
#[derive(Clone, Debug)]
pub struct Document<'src> {
    /// The source text the tokens point into.
    pub source: &'src str,
    /// Every node of this parse.
    pub arena: Arena,
    /// The top-level statements.
    pub root: Root,
}

impl<'src> Document<'src> {
    /// Creates a document.
    #[must_use]
    pub const fn new(source: &'src str, arena: Arena, root: Root) -> Self {
        Self {
            source,
            arena,
            root,
        }
    }

    /// A document with no statements.
    #[must_use]
    pub fn empty(source: &'src str) -> Self {
        Self::new(source, Arena::new(), Root::empty())
    }

    /// The lexeme of `token`.
    #[must_use]
    pub fn lexeme(&self, token: Token) -> &'src str {
        token.text(self.source)
    }

    /// Top-level statements.
    #[must_use]
    pub fn statements(&self) -> &[StatementId] {
        &self.root.statements
    }

    /// Looks up a statement.
    #[must_use]
    pub fn statement(&self, id: StatementId) -> &Statement {
        self.arena.statement(id)
    }

    /// Looks up a value.
    #[must_use]
    pub fn value(&self, id: ValueId) -> &Value {
        self.arena.value(id)
    }

    /// The lexeme of a statement's key token.
    #[must_use]
    pub fn key(&self, id: StatementId) -> &'src str {
        self.lexeme(self.statement(id).key())
    }

    /// Top-level statements whose key is `key`.
    pub fn find<'a>(&'a self, key: &'a str) -> impl Iterator<Item = StatementId> + 'a {
        self.root
            .statements
            .iter()
            .copied()
            .filter(move |&id| self.key(id) == key)
    }

    /// Where a statement starts.
    #[must_use]
    pub fn start(&self, id: StatementId) -> Position {
        self.arena.statement_start(id)
    }

    /// Where a statement ends.
    #[must_use]
    pub fn end(&self, id: StatementId) -> Position {
        self.arena.statement_end(id)
    }

    /// Every statement, depth-first in source order, with its nesting depth.
    ///
    /// Statements inside values are included wherever the value sits: a
    /// block passed to a function call or under a unary operator is visited
    /// one level below the statement that holds it.
    #[must_use]
    pub fn walk(&self) -> Walk<'_, 'src> {
        Walk {
            document: self,
            stack: self
                .root
                .statements
                .iter()
                .rev()
                .map(|&id| (id, 0))
                .collect(),
            nested: Vec::new(),
        }
    }

    /// A value and every value nested in it, depth-first in source order.
    ///
    /// Descends into function-call arguments and unary operands. Block
    /// values are yielded but their statements are not entered; [`walk`]
    /// covers those.
    ///
    /// [`walk`]: Document::walk
    #[must_use]
    pub fn values(&self, value: ValueId) -> Values<'_, 'src> {
        Values {
            document: self,
            stack: vec![value],
        }
    }
}

/// Depth-first iterator over a document's statements.
#[derive(Debug)]
pub struct Walk<'d, 'src> {
    document: &'d Document<'src>,
    stack: Vec<(StatementId, usize)>,
    nested: Vec<StatementId>,
}

impl Iterator for Walk<'_, '_> {
    type Item = (StatementId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let document = self.document;
        let statement = document.statement(id);
        self.nested.clear();
        self.nested.extend_from_slice(statement.children());
        if let Some(value) = statement.value() {
            for value in document.values(value) {
                if let Value::Block(block) = document.value(value) {
                    self.nested.extend_from_slice(&block.children);
                }
            }
        }
        self.stack
            .extend(self.nested.iter().rev().map(|&child| (child, depth + 1)));
        Some((id, depth))
    }
}

/// Depth-first iterator over a value tree.
#[derive(Debug)]
pub struct Values<'d, 'src> {
    document: &'d Document<'src>,
    stack: Vec<ValueId>,
}

impl Iterator for Values<'_, '_> {
    type Item = ValueId;

    fn next(&mut self) -> Option<ValueId> {
        let id = self.stack.pop()?;
        let document = self.document;
        match document.value(id) {
            Value::FunctionCall(call) => self.stack.extend(call.arguments.iter().rev()),
            Value::Unary(unary) => self.stack.push(unary.operand),
            Value::Literal(_) | Value::Block(_) | Value::Math(_) => {}
        }
        Some(id)
    }
}
