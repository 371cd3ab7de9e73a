//! Checking many files at once

use std::fs;
use std::path::PathBuf;

use pdxscript::extract::{Registries, RegistryKind};
use pdxscript::foundation::{CollectingSink, DiagnosticCode};
use pdxscript::language::TokenPool;
use pdxscript::runtime::{CheckConfig, Summary, check_files, check_source};

fn registries() -> Registries {
    Registries::new()
        .with(RegistryKind::Culture, ["french", "english"])
        .with(RegistryKind::Location, ["paris", "london"])
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pdxscript-batch-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn country(tag: &str, culture: &str) -> String {
    format!("{tag} = {{\n    color = rgb {{ 10 20 30 }}\n    culture_definition = {culture}\n}}\n")
}

#[test]
fn mixed_batch() {
    let dir = scratch_dir("mixed");
    let good = dir.join("good.txt");
    let invalid = dir.join("invalid.txt");
    let broken = dir.join("broken.txt");
    let empty = dir.join("empty.txt");
    let missing = dir.join("missing.txt");
    fs::write(&good, country("FRA", "french") + &country("ENG", "english")).unwrap();
    fs::write(&invalid, country("CAS", "castilian")).unwrap();
    fs::write(&broken, "FRA = { color = }").unwrap();
    fs::write(&empty, "# to do\n").unwrap();

    let paths = vec![good, invalid, broken, empty, missing];
    let sink = CollectingSink::new();
    let pool = TokenPool::new();
    let config = CheckConfig::default().with_jobs(4);
    let results = check_files(&paths, &registries(), &config, &pool, &sink);

    assert_eq!(results.len(), 5);
    let good = results[0].as_ref().unwrap();
    assert!(good.is_clean());
    assert_eq!(good.objects, 2);

    let invalid = results[1].as_ref().unwrap();
    assert!(invalid.parsed);
    assert_eq!((invalid.objects, invalid.valid_objects, invalid.errors), (1, 0, 1));

    let broken = results[2].as_ref().unwrap();
    assert!(!broken.parsed);
    assert_eq!(broken.objects, 0);

    let empty = results[3].as_ref().unwrap();
    assert!(empty.is_clean());
    assert_eq!(empty.warnings, 1);

    assert!(results[4].is_err());

    assert_eq!(sink.count(DiagnosticCode::FileParseFailed), 2);
    assert_eq!(sink.count(DiagnosticCode::EmptyFile), 1);
    assert_eq!(sink.count(DiagnosticCode::InvalidObjectKey), 1);

    let summary = Summary::of(&results);
    assert_eq!(summary.files, 5);
    assert_eq!(summary.failed_files, 2);
    assert_eq!(summary.objects, 3);
    assert_eq!(summary.valid_objects, 2);
    assert!(!summary.is_clean());
}

#[test]
fn results_do_not_depend_on_worker_count() {
    let dir = scratch_dir("jobs");
    let paths: Vec<PathBuf> = (0..12)
        .map(|i| {
            let path = dir.join(format!("c{i}.txt"));
            let culture = if i % 3 == 0 { "nubian" } else { "french" };
            fs::write(&path, country(&format!("C{i:02}"), culture)).unwrap();
            path
        })
        .collect();

    let run = |jobs| {
        let sink = CollectingSink::new();
        let pool = TokenPool::new();
        let config = CheckConfig::default().with_jobs(jobs);
        let results = check_files(&paths, &registries(), &config, &pool, &sink);
        let reports: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        (reports, sink.error_count())
    };

    let (serial, serial_errors) = run(1);
    let (parallel, parallel_errors) = run(5);
    assert_eq!(serial, parallel);
    assert_eq!(serial_errors, 4);
    assert_eq!(parallel_errors, 4);
}

#[test]
fn source_labels_reach_every_diagnostic() {
    let sink = CollectingSink::new();
    let pool = TokenPool::new();
    let source = "FRA = { color = rgb { 1 2 } culture_definition = french colour = red }";
    let report = check_source("memory:fra", source, &registries(), &CheckConfig::default(), &pool, &sink);
    assert_eq!(report.errors, 1);
    assert_eq!(report.warnings, 1);
    let diagnostics = sink.take();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.file.as_deref() == Some("memory:fra")));
}
