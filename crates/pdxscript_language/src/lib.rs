//! Lexer and parser for pdxscript.
//!
//! This crate provides:
//! - `Lexer` - Tokenization of script source, never failing
//! - `Parser` - Parsing tokens into an arena-backed syntax tree
//! - `TokenPool` - Reusable token buffers shared across files and threads
//! - `parse_document` - The whole pipeline for one file, reporting diagnostics

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod ast;
pub mod config;
pub mod lexer;
pub mod parser;
pub mod pool;
pub mod span;
pub mod token;


pub use arena::{Arena, StatementId, ValueId};
pub use ast::{
    BlockStatement, BlockValue, ContentStatement, Document, FunctionCall, KeyOnlyStatement,
    MathExpression, Root, ScriptedStatement, Statement, UnaryStatement, UnaryValue, Value, Values,
    Walk,
};
pub use config::ParseConfig;
pub use lexer::Lexer;
pub use parser::{PARSE_ACTION, Parser, parse, parse_document};
pub use pool::{PooledTokens, TokenPool};
pub use span::Span;
pub use token::{Token, TokenKind};
