//! Error types, diagnostics, and typed values for pdxscript.
//!
//! This crate provides:
//! - [`Error`] - Terminal errors that abort a file (syntax, I/O)
//! - [`Diagnostic`], [`DiagnosticContext`], [`DiagnosticSink`] - Recoverable problems
//! - [`Position`] - Line/column positions
//! - [`Date`], [`Color`] - Typed values produced by extraction

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostic;
pub mod error;
pub mod position;
pub mod value;

pub use diagnostic::{
    CollectingSink, Diagnostic, DiagnosticCode, DiagnosticContext, DiagnosticSink, LogSink,
    NullSink, Severity,
};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use position::Position;
pub use value::{Color, Date};
