//! Cross-layer integration tests for pdxscript
//!
//! Tests that verify correct interaction between multiple crates.

mod batch;
