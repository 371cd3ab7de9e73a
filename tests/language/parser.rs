//! Integration tests for the parser
//!
//! Tests parsing of game script files into documents.

use pdxscript_foundation::{CollectingSink, DiagnosticCode, DiagnosticContext, Position};
use pdxscript_language::{ParseConfig, Statement, TokenPool, Value, parse, parse_document};

const COUNTRY: &str = r#"# Kingdom of France
FRA = {
    color = rgb { 20 50 210 }
    culture_definition = french
    capital = paris
    name = { key = "FRA_name" }
    stability >= 10
    flags = { crusader_kingdom -1 }
    cost = @[ base_cost * 2 ]
}
"#;

// =============================================================================
// Whole documents
// =============================================================================

#[test]
fn parse_country_file() {
    let doc = parse(COUNTRY).unwrap();
    assert_eq!(doc.statements().len(), 1);
    let fra = doc.statements()[0];
    assert_eq!(doc.key(fra), "FRA");
    assert_eq!(doc.start(fra), Position::new(2, 1));
    assert_eq!(doc.end(fra), Position::new(10, 2));

    let keys: Vec<_> = doc
        .statement(fra)
        .children()
        .iter()
        .map(|&id| doc.key(id))
        .collect();
    assert_eq!(
        keys,
        vec!["color", "culture_definition", "capital", "name", "stability", "flags", "cost"]
    );
}

#[test]
fn find_returns_matching_top_level_statements() {
    let doc = parse("a = 1 b = 2 a = 3").unwrap();
    let found: Vec<_> = doc.find("a").map(|id| doc.start(id)).collect();
    assert_eq!(found, vec![Position::new(1, 1), Position::new(1, 13)]);
}

#[test]
fn walk_counts_nested_statements() {
    let doc = parse(COUNTRY).unwrap();
    let depths: Vec<_> = doc.walk().map(|(_, depth)| depth).collect();
    assert_eq!(depths.iter().filter(|&&d| d == 0).count(), 1);
    assert_eq!(depths.iter().max(), Some(&2));
}

#[test]
fn value_kinds() {
    let doc = parse(COUNTRY).unwrap();
    let fra = doc.statements()[0];
    let kinds: Vec<_> = doc
        .statement(fra)
        .children()
        .iter()
        .filter_map(|&id| doc.statement(id).as_content())
        .map(|content| doc.value(content.value).kind_name())
        .collect();
    assert_eq!(
        kinds,
        vec!["function call", "literal", "literal", "literal", "math expression"]
    );
}

#[test]
fn list_with_negative_entry() {
    let doc = parse("flags = { a -1 }").unwrap();
    let children = doc.statement(doc.statements()[0]).children().to_vec();
    let Statement::Unary(unary) = doc.statement(children[1]) else {
        panic!("expected unary statement");
    };
    let Value::Unary(value) = doc.value(unary.value) else {
        panic!("expected unary value");
    };
    assert_eq!(doc.lexeme(doc.value(value.operand).as_literal().unwrap()), "1");
}

#[test]
fn custom_scripted_keywords() {
    let source = "scripted_modifier strong = { a = 1 }";
    let tokens = pdxscript_language::Lexer::tokenize_all(source);
    let config = ParseConfig::default().with_scripted_keywords(["scripted_modifier"]);
    let doc = pdxscript_language::Parser::new(source, &tokens, &config)
        .parse()
        .unwrap();
    assert!(matches!(doc.statement(doc.statements()[0]), Statement::Scripted(_)));
}

// =============================================================================
// parse_document
// =============================================================================

#[test]
fn parse_document_clean_file() {
    let sink = CollectingSink::new();
    let pool = TokenPool::new();
    let mut cx = DiagnosticContext::new(&sink).with_file("fra.txt");
    let doc = parse_document(COUNTRY, &mut cx, &ParseConfig::default(), &pool);
    assert_eq!(doc.statements().len(), 1);
    assert!(sink.is_empty());
    assert_eq!(pool.available(), 1);
}

#[test]
fn parse_document_empty_file_warns() {
    let sink = CollectingSink::new();
    let pool = TokenPool::new();
    let mut cx = DiagnosticContext::new(&sink).with_file("empty.txt");
    let doc = parse_document("# nothing here\n", &mut cx, &ParseConfig::default(), &pool);
    assert!(doc.root.is_empty());
    let diagnostics = sink.take();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::EmptyFile);
    assert_eq!(diagnostics[0].args, vec!["empty.txt"]);
    assert_eq!(cx.errors(), 0);
}

#[test]
fn parse_document_error_discards_the_whole_file() {
    let sink = CollectingSink::new();
    let pool = TokenPool::new();
    let mut cx = DiagnosticContext::new(&sink).with_file("bad.txt");
    let source = "good = 1\nbad = }\n";
    let doc = parse_document(source, &mut cx, &ParseConfig::default(), &pool);
    assert!(doc.root.is_empty());

    let diagnostics = sink.take();
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![DiagnosticCode::UnexpectedToken, DiagnosticCode::FileParseFailed]
    );
    assert_eq!(diagnostics[0].position, Position::new(2, 7));
    assert_eq!(diagnostics[1].args[0], "bad.txt");
}

#[test]
fn parse_document_nesting_limit() {
    let sink = CollectingSink::new();
    let pool = TokenPool::new();
    let mut cx = DiagnosticContext::new(&sink);
    let source = format!("{}{}", "a = { ".repeat(10), "} ".repeat(10));
    let config = ParseConfig::default().with_max_depth(4);
    let doc = parse_document(&source, &mut cx, &config, &pool);
    assert!(doc.root.is_empty());
    assert_eq!(sink.count(DiagnosticCode::NestingTooDeep), 1);
    assert_eq!(sink.count(DiagnosticCode::FileParseFailed), 1);
}

#[test]
fn pool_buffers_are_reused_across_files() {
    let sink = CollectingSink::new();
    let pool = TokenPool::new();
    for _ in 0..5 {
        let mut cx = DiagnosticContext::new(&sink);
        let doc = parse_document(COUNTRY, &mut cx, &ParseConfig::default(), &pool);
        assert_eq!(doc.statements().len(), 1);
    }
    assert_eq!(pool.available(), 1);
}
