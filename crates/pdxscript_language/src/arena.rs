//! Node storage for one parse.
//!
//! The `Arena` owns every statement and value node created while parsing a
//! file. Nodes are appended and never removed; handles are plain indices, so
//! a tree can be walked without allocation, cloned, serialized, and shared
//! between readers.

// Node counts are bounded by token counts, which fit in u32 for any real file
#![allow(clippy::cast_possible_truncation)]

use std::fmt;

use pdxscript_foundation::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ast::{
    BlockStatement, BlockValue, ContentStatement, FunctionCall, KeyOnlyStatement, MathExpression,
    ScriptedStatement, Statement, UnaryStatement, UnaryValue, Value,
};
use crate::token::Token;

/// Handle to a statement node in an [`Arena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatementId(u32);

impl StatementId {
    /// Returns the raw index of this statement.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatementId({})", self.0)
    }
}

/// Handle to a value node in an [`Arena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueId(u32);

impl ValueId {
    /// Returns the raw index of this value.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueId({})", self.0)
    }
}

/// Allocate-only store for the nodes of one parse.
///
/// There is no removal API. Handles from one arena must not be used with
/// another; doing so panics on an out-of-range index or returns an unrelated
/// node.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Arena {
    statements: Vec<Statement>,
    values: Vec<Value>,
}

impl Arena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena sized for roughly `tokens` tokens of input.
    #[must_use]
    pub fn with_capacity(tokens: usize) -> Self {
        Self {
            statements: Vec::with_capacity(tokens / 3),
            values: Vec::with_capacity(tokens / 3),
        }
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    fn push_statement(&mut self, statement: Statement) -> StatementId {
        let id = StatementId(self.statements.len() as u32);
        self.statements.push(statement);
        id
    }

    fn push_value(&mut self, value: Value) -> ValueId {
        let id = ValueId(self.values.len() as u32);
        self.values.push(value);
        id
    }

    /// Allocates a block statement.
    pub fn alloc_block(&mut self, block: BlockStatement) -> StatementId {
        self.push_statement(Statement::Block(block))
    }

    /// Allocates a content pair.
    pub fn alloc_content(&mut self, key: Token, separator: Token, value: ValueId) -> StatementId {
        self.push_statement(Statement::Content(ContentStatement {
            key,
            separator,
            value,
        }))
    }

    /// Allocates a key-only entry.
    pub fn alloc_key_only(&mut self, key: Token) -> StatementId {
        self.push_statement(Statement::KeyOnly(KeyOnlyStatement { key }))
    }

    /// Allocates a scripted statement.
    pub fn alloc_scripted(&mut self, scripted: ScriptedStatement) -> StatementId {
        self.push_statement(Statement::Scripted(scripted))
    }

    /// Allocates a unary statement around an existing unary value.
    pub fn alloc_unary_statement(&mut self, operator: Token, value: ValueId) -> StatementId {
        self.push_statement(Statement::Unary(UnaryStatement { operator, value }))
    }

    /// Allocates a literal value.
    pub fn alloc_literal(&mut self, token: Token) -> ValueId {
        self.push_value(Value::Literal(token))
    }

    /// Allocates a function-call value.
    pub fn alloc_function_call(&mut self, call: FunctionCall) -> ValueId {
        self.push_value(Value::FunctionCall(call))
    }

    /// Allocates a block value.
    pub fn alloc_block_value(&mut self, block: BlockValue) -> ValueId {
        self.push_value(Value::Block(block))
    }

    /// Allocates a math expression.
    pub fn alloc_math(&mut self, math: MathExpression) -> ValueId {
        self.push_value(Value::Math(math))
    }

    /// Allocates a unary value.
    pub fn alloc_unary(&mut self, operator: Token, operand: ValueId) -> ValueId {
        self.push_value(Value::Unary(UnaryValue { operator, operand }))
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Looks up a statement.
    ///
    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[must_use]
    pub fn statement(&self, id: StatementId) -> &Statement {
        &self.statements[id.0 as usize]
    }

    /// Looks up a value.
    ///
    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[must_use]
    pub fn value(&self, id: ValueId) -> &Value {
        &self.values[id.0 as usize]
    }

    /// Number of statements allocated.
    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    /// Number of values allocated.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    // =========================================================================
    // Locations
    // =========================================================================

    /// Where a statement starts.
    #[must_use]
    pub fn statement_start(&self, id: StatementId) -> Position {
        self.statement(id).key().start()
    }

    /// Where a statement ends.
    ///
    /// Containers end at their closing brace, or at their last child when
    /// never closed, or at their opening brace when also empty.
    #[must_use]
    pub fn statement_end(&self, id: StatementId) -> Position {
        match self.statement(id) {
            Statement::Block(block) => {
                self.container_end(block.close, &block.children, block.open)
            }
            Statement::Scripted(scripted) => {
                self.container_end(scripted.close, &scripted.children, scripted.open)
            }
            Statement::Content(content) => self.value_end(content.value),
            Statement::KeyOnly(key_only) => key_only.key.end(),
            Statement::Unary(unary) => self.value_end(unary.value),
        }
    }

    /// Where a value starts.
    #[must_use]
    pub fn value_start(&self, id: ValueId) -> Position {
        match self.value(id) {
            Value::Literal(token) => token.start(),
            Value::FunctionCall(call) => call.name.start(),
            Value::Block(block) => block.open.start(),
            Value::Math(math) => math.open.start(),
            Value::Unary(unary) => unary.operator.start(),
        }
    }

    /// Where a value ends.
    #[must_use]
    pub fn value_end(&self, id: ValueId) -> Position {
        match self.value(id) {
            Value::Literal(token) => token.end(),
            Value::FunctionCall(call) => match (call.close, call.arguments.last()) {
                (Some(close), _) => close.end(),
                (None, Some(&last)) => self.value_end(last),
                (None, None) => call.open.end(),
            },
            Value::Block(block) => self.container_end(block.close, &block.children, block.open),
            Value::Math(math) => math
                .close
                .or_else(|| math.tokens.last().copied())
                .unwrap_or(math.open)
                .end(),
            Value::Unary(unary) => self.value_end(unary.operand),
        }
    }

    fn container_end(&self, close: Option<Token>, children: &[StatementId], open: Token) -> Position {
        match (close, children.last()) {
            (Some(close), _) => close.end(),
            (None, Some(&last)) => self.statement_end(last),
            (None, None) => open.end(),
        }
    }
}
