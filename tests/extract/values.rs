//! Integration tests for value extractors

use pdxscript_extract::{ExtractConfig, Registries, RegistryKind, parse_bool};
use pdxscript_foundation::{Color, Date, DiagnosticCode, Position};

use crate::{extract, nth};

// =============================================================================
// Primitives
// =============================================================================

#[test]
fn primitives_extract() {
    let source = "width = 1280 ratio = 1.5 visible = yes start = 1444.11.11 label = \"Île-de-France\"";
    let (values, diagnostics) = extract(source, &Registries::new(), ExtractConfig::default(), |ex, doc| {
        (
            ex.int(nth(doc, 0), "t.width"),
            ex.float(nth(doc, 1), "t.ratio"),
            ex.bool(nth(doc, 2), "t.visible"),
            ex.date(nth(doc, 3), "t.start"),
            ex.string(nth(doc, 4), "t.label"),
        )
    });
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(values.0, Some(1280));
    assert_eq!(values.1, Some(1.5));
    assert_eq!(values.2, Some(true));
    assert_eq!(values.3, Date::new(1444, 11, 11));
    assert_eq!(values.4.as_deref(), Some("Île-de-France"));
}

#[test]
fn each_failure_reports_exactly_once() {
    let source = "a = high b = 1.5.5 c = maybe d = 1444.2.30 e = { }";
    let (values, diagnostics) = extract(source, &Registries::new(), ExtractConfig::default(), |ex, doc| {
        [
            ex.int(nth(doc, 0), "t").is_none(),
            ex.float(nth(doc, 1), "t").is_none(),
            ex.bool(nth(doc, 2), "t").is_none(),
            ex.date(nth(doc, 3), "t").is_none(),
            ex.int(nth(doc, 4), "t").is_none(),
        ]
    });
    assert_eq!(values, [true; 5]);
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::InvalidIntegerValue,
            DiagnosticCode::InvalidFloatValue,
            DiagnosticCode::InvalidBoolValue,
            DiagnosticCode::InvalidDateValue,
            DiagnosticCode::InvalidNodeType,
        ]
    );
    assert!(diagnostics.iter().all(|d| d.file.as_deref() == Some("test.txt")));
}

#[test]
fn diagnostics_point_at_the_value() {
    let (_, diagnostics) = extract("playable = maybe", &Registries::new(), ExtractConfig::default(), |ex, doc| {
        ex.bool(nth(doc, 0), "country.playable")
    });
    assert_eq!(diagnostics[0].position, Position::new(1, 12));
    assert_eq!(diagnostics[0].action, "country.playable");
}

#[test]
fn comparison_separators() {
    let (values, diagnostics) = extract(
        "a >= 5 b < -2 c >= yes",
        &Registries::new(),
        ExtractConfig::default(),
        |ex, doc| (ex.int(nth(doc, 0), "t"), ex.int(nth(doc, 1), "t"), ex.bool(nth(doc, 2), "t")),
    );
    assert_eq!(values, (Some(5), Some(-2), None));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidSeparator);
}

#[test]
fn short_year_number_extracts_as_date() {
    let (date, diagnostics) = extract("founded = 12.5.3", &Registries::new(), ExtractConfig::default(), |ex, doc| {
        ex.date(nth(doc, 0), "t")
    });
    assert_eq!(date, Date::new(12, 5, 3));
    assert!(diagnostics.is_empty());
}

#[test]
fn bool_spellings() {
    assert_eq!(parse_bool("yes"), Some(true));
    assert_eq!(parse_bool("no"), Some(false));
    assert_eq!(parse_bool("true"), None);
    assert_eq!(parse_bool("YES"), None);
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn lookups_resolve_against_the_registry() {
    let registries = Registries::new()
        .with(RegistryKind::Location, ["paris"])
        .with(RegistryKind::Culture, ["french"]);
    let (keys, diagnostics) = extract(
        "capital = paris culture = french other = Paris",
        &registries,
        ExtractConfig::default(),
        |ex, doc| {
            (
                ex.location(nth(doc, 0), "t"),
                ex.culture(nth(doc, 1), "t"),
                ex.location(nth(doc, 2), "t"),
            )
        },
    );
    assert_eq!(keys.0.map(|k| k.to_string()).as_deref(), Some("location:paris"));
    assert_eq!(keys.1.map(|k| k.key).as_deref(), Some("french"));
    assert_eq!(keys.2, None);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidObjectKey);
    assert_eq!(diagnostics[0].args, vec!["Paris", "location"]);
}

// =============================================================================
// Colors
// =============================================================================

#[test]
fn color_forms() {
    let registries = Registries::new().with(RegistryKind::NamedColor, ["dark_blue"]);
    let source = "a = rgb { 20 50 210 } b = hsv { 0.5 1 1 } c = hsv360 { 180 100 50 } d = dark_blue";
    let (colors, diagnostics) = extract(source, &registries, ExtractConfig::default(), |ex, doc| {
        (0..4).map(|n| ex.color(nth(doc, n), "t")).collect::<Vec<_>>()
    });
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(colors[0], Some(Color::Rgb { r: 20, g: 50, b: 210, a: 255 }));
    assert_eq!(colors[1], Some(Color::Hsv { h: 0.5, s: 1.0, v: 1.0 }));
    assert_eq!(colors[2], Some(Color::Hsv { h: 0.5, s: 1.0, v: 0.5 }));
    assert_eq!(colors[3], Some(Color::Named("dark_blue".into())));
}

#[test]
fn color_failures() {
    let source = "a = rgb { 20 50 } b = rgb { 20 50 300 } c = cmyk { 1 2 3 4 } d = 7";
    let (colors, diagnostics) = extract(source, &Registries::new(), ExtractConfig::default(), |ex, doc| {
        (0..4).map(|n| ex.color(nth(doc, n), "t")).collect::<Vec<_>>()
    });
    assert!(colors.iter().all(Option::is_none));
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::InvalidColorMarkup,
            DiagnosticCode::InvalidColorValue,
            DiagnosticCode::InvalidColorMarkup,
            DiagnosticCode::InvalidColorMarkup,
        ]
    );
}
