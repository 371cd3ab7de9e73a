//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Position, Date, Color, Error, and diagnostics.

mod diagnostics;
mod errors;
mod values;
