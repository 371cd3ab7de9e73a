//! Integration tests for the diagnostic channel

use std::thread;

use pdxscript_foundation::{
    CollectingSink, Diagnostic, DiagnosticCode, DiagnosticContext, NullSink, Position, Severity,
};

// =============================================================================
// Codes
// =============================================================================

#[test]
fn every_code_has_a_name_and_message() {
    for &code in DiagnosticCode::ALL {
        assert!(!code.name().is_empty());
        assert!(!code.render(&[]).is_empty());
    }
}

#[test]
fn warnings_are_the_tolerated_codes() {
    let warnings: Vec<_> = DiagnosticCode::ALL
        .iter()
        .copied()
        .filter(|code| code.severity() == Severity::Warning)
        .collect();
    assert_eq!(
        warnings,
        vec![
            DiagnosticCode::EmptyFile,
            DiagnosticCode::UnknownField,
            DiagnosticCode::DuplicateField
        ]
    );
}

#[test]
fn render_fills_arguments_in_order() {
    let message = DiagnosticCode::InvalidObjectKey.render(&["paris".into(), "location".into()]);
    assert_eq!(message, "unknown location key 'paris'");
}

#[test]
fn render_marks_missing_arguments() {
    let message = DiagnosticCode::InvalidBoolValue.render(&[]);
    assert!(message.starts_with("'?'"));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_stamps_file_and_position() {
    let sink = CollectingSink::new();
    let mut cx = DiagnosticContext::new(&sink).with_file("fra.txt");
    cx.set_position(Position::new(4, 9));
    cx.report(DiagnosticCode::InvalidIntegerValue, "country.stability", &[&"high"]);
    cx.report(DiagnosticCode::UnknownField, "country", &[&"colour", &"country"]);

    assert_eq!(cx.reported(), 2);
    assert_eq!(cx.errors(), 1);

    let diagnostics = sink.take();
    assert_eq!(diagnostics.len(), 2);
    let first = &diagnostics[0];
    assert_eq!(first.file.as_deref(), Some("fra.txt"));
    assert_eq!(first.position, Position::new(4, 9));
    assert_eq!(first.action, "country.stability");
    assert_eq!(first.args, vec!["high"]);
    assert!(first.is_error());
    assert!(!diagnostics[1].is_error());
    assert!(sink.is_empty());
}

#[test]
fn diagnostic_display() {
    let diagnostic = Diagnostic::new(
        DiagnosticCode::InvalidBoolValue,
        "country.playable",
        Position::new(3, 16),
        vec!["maybe".into()],
    )
    .in_file("fra.txt");
    let rendered = diagnostic.to_string();
    assert!(rendered.starts_with("fra.txt:3:16: error[invalid-bool-value]"));
    assert!(rendered.ends_with("(country.playable)"));
}

#[test]
fn null_sink_still_counts() {
    let mut cx = DiagnosticContext::new(&NullSink);
    cx.report(DiagnosticCode::EmptyFile, "parser", &[&"a.txt"]);
    assert_eq!(cx.reported(), 1);
    assert_eq!(cx.errors(), 0);
}

#[test]
fn collecting_sink_is_shared_across_threads() {
    let sink = CollectingSink::new();
    thread::scope(|scope| {
        for i in 0..4 {
            let sink = &sink;
            scope.spawn(move || {
                let mut cx = DiagnosticContext::new(sink).with_file(format!("f{i}.txt"));
                for _ in 0..25 {
                    cx.report(DiagnosticCode::UnknownField, "country", &[&"x", &"country"]);
                }
            });
        }
    });
    assert_eq!(sink.len(), 100);
    assert_eq!(sink.count(DiagnosticCode::UnknownField), 100);
    assert_eq!(sink.error_count(), 0);
}
