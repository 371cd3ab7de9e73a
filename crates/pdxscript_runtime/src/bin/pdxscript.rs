//! pdxscript CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use pdxscript_extract::{Registries, RegistryKind};
use pdxscript_foundation::CollectingSink;
use pdxscript_language::TokenPool;
use pdxscript_runtime::{CheckConfig, Summary, check_files, load_registry, read_source};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    registries: Vec<(RegistryKind, PathBuf)>,
    jobs: Option<usize>,
    quiet: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-q" | "--quiet" => config.quiet = true,
            "-j" | "--jobs" => {
                i += 1;
                if i >= args.len() {
                    return Err("--jobs requires a value".into());
                }
                config.jobs = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid --jobs value: {}", args[i]))?,
                );
            }
            "--registry" => {
                i += 1;
                if i >= args.len() {
                    return Err("--registry requires KIND=FILE".into());
                }
                let (kind, path) = args[i]
                    .split_once('=')
                    .ok_or_else(|| format!("invalid --registry value: {}", args[i]))?;
                let kind = RegistryKind::from_name(kind)
                    .ok_or_else(|| format!("unknown registry kind: {kind}"))?;
                config.registries.push((kind, PathBuf::from(path)));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

/// Returns whether every file checked clean.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(true);
    }

    if cli.show_version {
        println!("pdxscript {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    if cli.files.is_empty() {
        return Err("no input files (try --help)".into());
    }

    let mut config = CheckConfig::default().with_show_warnings(!cli.quiet);
    if let Some(jobs) = cli.jobs {
        config = config.with_jobs(jobs);
    }

    let pool = TokenPool::new();
    let sink = CollectingSink::new();

    let mut registries = Registries::new();
    for (kind, path) in &cli.registries {
        let source = read_source(path)?;
        load_registry(
            &mut registries,
            *kind,
            &path.display().to_string(),
            &source,
            &pool,
            &sink,
        );
    }

    let results = check_files(&cli.files, &registries, &config, &pool, &sink);

    for diagnostic in sink.take() {
        if config.show_warnings || diagnostic.is_error() {
            eprintln!("{diagnostic}");
        }
    }
    for result in &results {
        if let Err(e) = result {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
        }
    }

    let summary = Summary::of(&results);
    print_summary(&summary);
    Ok(summary.is_clean())
}

fn print_summary(summary: &Summary) {
    println!(
        "\x1b[1m{} file(s)\x1b[0m, {} failed, {} statements, {}/{} valid objects",
        summary.files,
        summary.failed_files,
        summary.statements,
        summary.valid_objects,
        summary.objects
    );
    println!("{} error(s), {} warning(s)", summary.errors, summary.warnings);
}

fn print_help() {
    println!(
        "\x1b[1mpdxscript\x1b[0m - Parser and checker for Paradox game scripts

\x1b[1mUSAGE:\x1b[0m
    pdxscript [OPTIONS] FILES...

\x1b[1mARGUMENTS:\x1b[0m
    FILES...      Country definition files to check

\x1b[1mOPTIONS:\x1b[0m
    -h, --help              Print help information
    -V, --version           Print version information
    -q, --quiet             Print errors only
    -j, --jobs N            Number of worker threads
    --registry KIND=FILE    Load the top-level keys of FILE as KIND

\x1b[1mREGISTRY KINDS:\x1b[0m
    location area region province language dialect religious_school
    culture country_rank modifier_definition named_color

\x1b[1mEXAMPLES:\x1b[0m
    pdxscript countries/*.txt
    pdxscript -j 4 --registry culture=cultures.txt countries.txt
    RUST_LOG=debug pdxscript countries.txt

Exit status is non-zero if any file fails to read or parse, or any error is reported."
    );
}
