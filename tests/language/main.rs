//! Integration tests for Layer 1: Language
//!
//! Tests for the lexer, the parser, and pooled document parsing.

mod parser;
