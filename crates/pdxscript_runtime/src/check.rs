//! Checking script files.
//!
//! Each file is lexed, parsed and extracted on one thread with its own
//! lexer, arena and parser. Files checked in parallel share only the token
//! pool, the diagnostic sink and the read-only resolver.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use pdxscript_extract::{CountryDefinition, Extractor, Registries, RegistryKind, Resolver};
use pdxscript_foundation::{
    Diagnostic, DiagnosticCode, DiagnosticContext, DiagnosticSink, Error, Position, Result,
};
use pdxscript_language::{Statement, TokenPool, parse_document};

use crate::config::CheckConfig;

/// Action name for file-level problems found by the runtime.
const READ_ACTION: &str = "runtime.read_file";

/// The outcome of checking one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileReport {
    /// File label.
    pub file: String,
    /// Whether the file parsed.
    pub parsed: bool,
    /// Statements at every depth.
    pub statements: usize,
    /// Deepest statement nesting.
    pub max_depth: usize,
    /// Top-level objects extracted.
    pub objects: usize,
    /// Objects that extracted without failure.
    pub valid_objects: usize,
    /// Error diagnostics reported for this file.
    pub errors: usize,
    /// Warning and info diagnostics reported for this file.
    pub warnings: usize,
}

impl FileReport {
    /// Returns true if nothing in the file was an error.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.parsed && self.errors == 0
    }
}

/// Totals over many files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files checked.
    pub files: usize,
    /// Files that could not be read or parsed.
    pub failed_files: usize,
    /// Statements at every depth.
    pub statements: usize,
    /// Objects extracted.
    pub objects: usize,
    /// Objects extracted without failure.
    pub valid_objects: usize,
    /// Error diagnostics.
    pub errors: usize,
    /// Warning diagnostics.
    pub warnings: usize,
}

impl Summary {
    /// Adds up a batch of results.
    #[must_use]
    pub fn of(results: &[Result<FileReport>]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.files += 1;
            match result {
                Ok(report) => {
                    if !report.parsed {
                        summary.failed_files += 1;
                    }
                    summary.statements += report.statements;
                    summary.objects += report.objects;
                    summary.valid_objects += report.valid_objects;
                    summary.errors += report.errors;
                    summary.warnings += report.warnings;
                }
                Err(_) => {
                    summary.failed_files += 1;
                    summary.errors += 1;
                }
            }
        }
        summary
    }

    /// Returns true if no file failed and no error was reported.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed_files == 0 && self.errors == 0
    }
}

/// Parses one file and extracts a [`CountryDefinition`] from every
/// top-level block.
pub fn check_source(
    label: &str,
    source: &str,
    resolver: &dyn Resolver,
    config: &CheckConfig,
    pool: &TokenPool,
    sink: &dyn DiagnosticSink,
) -> FileReport {
    let mut cx = DiagnosticContext::new(sink).with_file(label);
    let document = parse_document(source, &mut cx, &config.parse, pool);
    let parsed = cx.errors() == 0;

    let mut report = FileReport {
        file: label.to_string(),
        parsed,
        ..FileReport::default()
    };
    for (_, depth) in document.walk() {
        report.statements += 1;
        report.max_depth = report.max_depth.max(depth);
    }

    let mut extractor = Extractor::new(&document, cx, resolver, config.extract);
    for &id in document.statements() {
        if !matches!(document.statement(id), Statement::Block(_)) {
            continue;
        }
        let (_, validity) = CountryDefinition::extract(&mut extractor, id);
        report.objects += 1;
        if validity.is_valid() {
            report.valid_objects += 1;
        }
    }

    let cx = extractor.finish();
    report.errors = cx.errors();
    report.warnings = cx.reported() - cx.errors();
    log::debug!(
        "{label}: {} statements, {}/{} valid objects",
        report.statements,
        report.valid_objects,
        report.objects
    );
    report
}

/// Reads a whole file as UTF-8 text.
///
/// # Errors
/// Returns an [`Io`](pdxscript_foundation::ErrorKind::Io) error if the file
/// cannot be read or is not UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))
}

/// Reads and checks one file. A read failure is also reported to `sink`.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn check_file(
    path: &Path,
    resolver: &dyn Resolver,
    config: &CheckConfig,
    pool: &TokenPool,
    sink: &dyn DiagnosticSink,
) -> Result<FileReport> {
    let label = path.display().to_string();
    let source = read_source(path).inspect_err(|error| {
        log::warn!("{error}");
        sink.report(
            Diagnostic::new(
                DiagnosticCode::FileParseFailed,
                READ_ACTION,
                Position::start(),
                vec![label.clone(), error.to_string()],
            )
            .in_file(label.clone()),
        );
    })?;
    Ok(check_source(&label, &source, resolver, config, pool, sink))
}

/// Checks many files on `config.jobs` worker threads.
///
/// Results come back in the order of `paths`.
pub fn check_files<P: AsRef<Path> + Sync>(
    paths: &[P],
    resolver: &dyn Resolver,
    config: &CheckConfig,
    pool: &TokenPool,
    sink: &dyn DiagnosticSink,
) -> Vec<Result<FileReport>> {
    let next = AtomicUsize::new(0);
    let workers = config.jobs.clamp(1, paths.len().max(1));
    log::debug!("checking {} files on {workers} threads", paths.len());

    let mut results: Vec<(usize, Result<FileReport>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut done = Vec::new();
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(path) = paths.get(index) else {
                            break done;
                        };
                        done.push((index, check_file(path.as_ref(), resolver, config, pool, sink)));
                    }
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

/// Adds the top-level keys of a script file to the `kind` registry.
///
/// Game data defines each object as a top-level block, so the block keys
/// of, say, a cultures file are the culture registry.
pub fn load_registry(
    registries: &mut Registries,
    kind: RegistryKind,
    label: &str,
    source: &str,
    pool: &TokenPool,
    sink: &dyn DiagnosticSink,
) -> usize {
    let mut cx = DiagnosticContext::new(sink).with_file(label);
    let config = pdxscript_language::ParseConfig::default().with_report_empty_file(false);
    let document = parse_document(source, &mut cx, &config, pool);
    let mut added = 0;
    for &id in document.statements() {
        registries.insert(kind, document.key(id));
        added += 1;
    }
    log::debug!("{label}: {added} {kind} keys");
    added
}
