//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use pdxscript_foundation::{Error, ErrorContext, ErrorKind, Position};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_syntax() {
    let err = Error::syntax("a statement", "'='", Position::new(2, 5), "    = 3");
    assert!(matches!(err.kind, ErrorKind::Syntax { line: 2, column: 5, .. }));
    assert!(err.is_syntax());
    assert_eq!(err.position(), Some(Position::new(2, 5)));
    let msg = format!("{err}");
    assert!(msg.contains("a statement"));
    assert!(msg.contains("'='"));
    assert!(msg.contains("2:5"));
}

#[test]
fn error_nesting_too_deep() {
    let err = Error::nesting_too_deep(64, Position::new(70, 1));
    assert!(matches!(err.kind, ErrorKind::NestingTooDeep { limit: 64, .. }));
    assert!(err.is_syntax());
    assert!(format!("{err}").contains("64"));
}

#[test]
fn error_io() {
    let err = Error::io("countries/fra.txt", "No such file or directory");
    assert!(matches!(err.kind, ErrorKind::Io { .. }));
    assert!(!err.is_syntax());
    assert_eq!(err.position(), None);
    let msg = format!("{err}");
    assert!(msg.contains("countries/fra.txt"));
    assert!(msg.contains("No such file"));
}

#[test]
fn error_internal() {
    let err = Error::new(ErrorKind::Internal("arena handle out of range".into()));
    assert!(format!("{err}").contains("internal error"));
    assert_eq!(err.position(), None);
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_with_context() {
    let context = ErrorContext::new()
        .with_source("fra.txt")
        .with_frame("FRA")
        .with_frame("name");
    let err = Error::syntax("'}'", "end of input", Position::new(9, 1), "").with_context(context);
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.source.as_deref(), Some("fra.txt"));
    assert_eq!(context.stack, vec!["FRA", "name"]);
    let rendered = context.to_string();
    assert!(rendered.starts_with("in fra.txt"));
    assert!(rendered.contains("  in name"));
}

#[test]
fn error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::io("a", "b"));
}
