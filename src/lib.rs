//! pdxscript - Parser and checker for Clausewitz-style game script
//!
//! This crate re-exports all layers of the pdxscript system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: pdxscript_runtime   : Parallel file checking, CLI
//! Layer 2: pdxscript_extract   : Validating extraction into typed values
//! Layer 1: pdxscript_language  : Lexer, parser, arena AST, token pool
//! Layer 0: pdxscript_foundation: Core types (Position, Date, Color, Error, diagnostics)
//! ```

pub use pdxscript_extract as extract;
pub use pdxscript_foundation as foundation;
pub use pdxscript_language as language;
pub use pdxscript_runtime as runtime;
