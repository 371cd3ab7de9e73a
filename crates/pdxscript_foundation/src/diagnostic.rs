//! Structured diagnostics for recoverable problems.
//!
//! Everything that does not abort a file is reported through a
//! [`DiagnosticContext`], which stamps each report with the current position
//! and the file label before handing it to a [`DiagnosticSink`].
//!
//! Sinks take `&self` and must be `Send + Sync`: one sink may collect
//! diagnostics from files parsed on several threads.

use std::fmt;
use std::sync::{Mutex, PoisonError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::Position;

// =============================================================================
// Severity and codes
// =============================================================================

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// The file or field is invalid.
    Error,
    /// Suspicious but tolerated.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// The closed set of diagnostic codes.
///
/// Each code has a fixed severity and a message template; `{n}` in the
/// template is replaced by the n-th format argument of the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticCode {
    /// A token matched no grammar alternative. Args: expected, found.
    UnexpectedToken,
    /// Blocks nested past the parser limit. Args: limit.
    NestingTooDeep,
    /// A file could not be read or parsed. Args: file, reason.
    FileParseFailed,
    /// A file contained no statements. Args: file.
    EmptyFile,
    /// Wrong separator for the extractor. Args: accepted, found.
    InvalidSeparator,
    /// An identifier was required. Args: found.
    ExpectedIdentifier,
    /// Wrong node shape at this position. Args: expected, found.
    InvalidNodeType,
    /// Args: lexeme.
    InvalidIntegerValue,
    /// Args: lexeme.
    InvalidFloatValue,
    /// Args: lexeme.
    InvalidBoolValue,
    /// Args: lexeme.
    InvalidDateValue,
    /// Args: lexeme, enum name, legal members.
    InvalidEnumValue,
    /// Key missing from a registry. Args: key, target type.
    InvalidObjectKey,
    /// Unsupported color syntax. Args: found, accepted forms.
    InvalidColorMarkup,
    /// Color component out of range. Args: component, value, range.
    InvalidColorValue,
    /// Wrong child count. Args: expected count, node type, actual count.
    InvalidNodeCountOfType,
    /// Args: key, object.
    MissingRequiredField,
    /// Args: key, object.
    UnknownField,
    /// Args: key, object.
    DuplicateField,
}

impl DiagnosticCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::UnexpectedToken,
        Self::NestingTooDeep,
        Self::FileParseFailed,
        Self::EmptyFile,
        Self::InvalidSeparator,
        Self::ExpectedIdentifier,
        Self::InvalidNodeType,
        Self::InvalidIntegerValue,
        Self::InvalidFloatValue,
        Self::InvalidBoolValue,
        Self::InvalidDateValue,
        Self::InvalidEnumValue,
        Self::InvalidObjectKey,
        Self::InvalidColorMarkup,
        Self::InvalidColorValue,
        Self::InvalidNodeCountOfType,
        Self::MissingRequiredField,
        Self::UnknownField,
        Self::DuplicateField,
    ];

    /// The fixed severity of this code.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::EmptyFile | Self::UnknownField | Self::DuplicateField => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable kebab-case name, used in rendered output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UnexpectedToken => "unexpected-token",
            Self::NestingTooDeep => "nesting-too-deep",
            Self::FileParseFailed => "file-parse-failed",
            Self::EmptyFile => "empty-file",
            Self::InvalidSeparator => "invalid-separator",
            Self::ExpectedIdentifier => "expected-identifier",
            Self::InvalidNodeType => "invalid-node-type",
            Self::InvalidIntegerValue => "invalid-integer-value",
            Self::InvalidFloatValue => "invalid-float-value",
            Self::InvalidBoolValue => "invalid-bool-value",
            Self::InvalidDateValue => "invalid-date-value",
            Self::InvalidEnumValue => "invalid-enum-value",
            Self::InvalidObjectKey => "invalid-object-key",
            Self::InvalidColorMarkup => "invalid-color-markup",
            Self::InvalidColorValue => "invalid-color-value",
            Self::InvalidNodeCountOfType => "invalid-node-count-of-type",
            Self::MissingRequiredField => "missing-required-field",
            Self::UnknownField => "unknown-field",
            Self::DuplicateField => "duplicate-field",
        }
    }

    const fn template(self) -> &'static str {
        match self {
            Self::UnexpectedToken => "expected {0}, found {1}",
            Self::NestingTooDeep => "blocks are nested deeper than {0} levels",
            Self::FileParseFailed => "failed to parse '{0}': {1}",
            Self::EmptyFile => "file '{0}' contains no statements",
            Self::InvalidSeparator => "expected separator {0}, found '{1}'",
            Self::ExpectedIdentifier => "expected an identifier, found {0}",
            Self::InvalidNodeType => "expected {0}, found {1}",
            Self::InvalidIntegerValue => "'{0}' is not a valid integer",
            Self::InvalidFloatValue => "'{0}' is not a valid number",
            Self::InvalidBoolValue => "'{0}' is not a valid boolean, expected 'yes' or 'no'",
            Self::InvalidDateValue => "'{0}' is not a valid date, expected year.month.day",
            Self::InvalidEnumValue => "'{0}' is not a valid {1}; legal values: {2}",
            Self::InvalidObjectKey => "unknown {1} key '{0}'",
            Self::InvalidColorMarkup => "invalid color {0}; accepted forms: {1}",
            Self::InvalidColorValue => "color component {0} = {1} is outside {2}",
            Self::InvalidNodeCountOfType => "expected {0} {1} node(s), found {2}",
            Self::MissingRequiredField => "missing required field '{0}' in {1}",
            Self::UnknownField => "unknown field '{0}' in {1}",
            Self::DuplicateField => "field '{0}' is set more than once in {1}",
        }
    }

    /// Renders the message for this code with the given arguments.
    ///
    /// Missing arguments render as `?`.
    #[must_use]
    pub fn render(self, args: &[String]) -> String {
        let template = self.template();
        let mut out = String::with_capacity(template.len() + 16);
        let mut chars = template.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c == '{' {
                if let Some(close) = template[i..].find('}') {
                    if let Ok(index) = template[i + 1..i + close].parse::<usize>() {
                        out.push_str(args.get(index).map_or("?", String::as_str));
                        while chars.peek().is_some_and(|&(j, _)| j <= i + close) {
                            chars.next();
                        }
                        continue;
                    }
                }
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// One reported problem.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// What went wrong.
    pub code: DiagnosticCode,
    /// Severity, fixed by the code.
    pub severity: Severity,
    /// Dotted name of the operation that reported it, e.g. `country.capital`.
    pub action: String,
    /// Label of the file being processed, if known.
    pub file: Option<String>,
    /// Where the problem is.
    pub position: Position,
    /// Format arguments embedded in the message.
    pub args: Vec<String>,
    /// Rendered message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic, rendering its message from the code template.
    #[must_use]
    pub fn new(
        code: DiagnosticCode,
        action: impl Into<String>,
        position: Position,
        args: Vec<String>,
    ) -> Self {
        let message = code.render(&args);
        Self {
            code,
            severity: code.severity(),
            action: action.into(),
            file: None,
            position,
            args,
            message,
        }
    }

    /// Sets the file label.
    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Returns true if this diagnostic has error severity.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}:")?;
        }
        write!(
            f,
            "{}: {}[{}]: {} ({})",
            self.position, self.severity, self.code, self.message, self.action
        )
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Receives diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Accepts one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// A sink that stores every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Removes and returns everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of diagnostics collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of diagnostics with the given code.
    #[must_use]
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.lock().iter().filter(|d| d.code == code).count()
    }

    /// Number of error-severity diagnostics.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.lock().iter().filter(|d| d.is_error()).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}

/// A sink that forwards diagnostics to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => log::error!("{diagnostic}"),
            Severity::Warning => log::warn!("{diagnostic}"),
        }
    }
}

/// A sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

// =============================================================================
// DiagnosticContext
// =============================================================================

/// The reporting handle threaded through parsing and extraction.
///
/// Callers move the current position with [`DiagnosticContext::set_position`]
/// immediately before each [`DiagnosticContext::report`].
pub struct DiagnosticContext<'s> {
    sink: &'s dyn DiagnosticSink,
    file: Option<String>,
    position: Position,
    reported: usize,
    errors: usize,
}

impl<'s> DiagnosticContext<'s> {
    /// Creates a context reporting into `sink`.
    #[must_use]
    pub fn new(sink: &'s dyn DiagnosticSink) -> Self {
        Self {
            sink,
            file: None,
            position: Position::start(),
            reported: 0,
            errors: 0,
        }
    }

    /// Sets the file label stamped on every diagnostic.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// The file label, if any.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Moves the current position.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// The current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Reports one diagnostic at the current position.
    pub fn report(&mut self, code: DiagnosticCode, action: &str, args: &[&dyn fmt::Display]) {
        let args = args.iter().map(ToString::to_string).collect();
        let mut diagnostic = Diagnostic::new(code, action, self.position, args);
        if let Some(file) = &self.file {
            diagnostic = diagnostic.in_file(file.clone());
        }
        self.reported += 1;
        if diagnostic.is_error() {
            self.errors += 1;
        }
        self.sink.report(diagnostic);
    }

    /// Number of diagnostics reported through this context.
    #[must_use]
    pub const fn reported(&self) -> usize {
        self.reported
    }

    /// Number of error-severity diagnostics reported through this context.
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }
}

impl fmt::Debug for DiagnosticContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticContext")
            .field("file", &self.file)
            .field("position", &self.position)
            .field("reported", &self.reported)
            .finish_non_exhaustive()
    }
}
