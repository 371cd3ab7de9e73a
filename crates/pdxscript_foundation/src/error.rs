//! Terminal error types for pdxscript.
//!
//! An [`Error`] aborts the current file. Recoverable problems never travel
//! through this channel; they are reported as diagnostics instead (see
//! [`crate::diagnostic`]).

use std::fmt;

use thiserror::Error;

use crate::position::Position;

/// The main error type for operations that abort a whole file.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(
        expected: impl Into<String>,
        found: impl Into<String>,
        at: Position,
        line_text: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::Syntax {
            expected: expected.into(),
            found: found.into(),
            line: at.line,
            column: at.column,
            context: line_text.into(),
        })
    }

    /// Creates a nesting-limit error.
    #[must_use]
    pub fn nesting_too_deep(limit: usize, at: Position) -> Self {
        Self::new(ErrorKind::NestingTooDeep {
            limit,
            line: at.line,
            column: at.column,
        })
    }

    /// Creates an I/O error for a file that could not be read as UTF-8 text.
    #[must_use]
    pub fn io(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            message: message.to_string(),
        })
    }

    /// Returns the source position this error points at, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match &self.kind {
            ErrorKind::Syntax { line, column, .. } | ErrorKind::NestingTooDeep { line, column, .. } => {
                Some(Position::new(*line, *column))
            }
            ErrorKind::Io { .. } | ErrorKind::Internal(_) => None,
        }
    }

    /// Returns true if this is a grammar violation.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Syntax { .. } | ErrorKind::NestingTooDeep { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The current token matches no grammar alternative.
    #[error("syntax error at {line}:{column}: expected {expected}, found {found}")]
    Syntax {
        /// What the parser expected.
        expected: String,
        /// Description of the offending token.
        found: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// Blocks are nested deeper than the configured limit.
    #[error("nesting deeper than {limit} levels at {line}:{column}")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
    },

    /// A source file could not be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying error text.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file label.
    pub source: Option<String>,
    /// Enclosing statements, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source label.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds an enclosing statement frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias using the pdxscript [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
