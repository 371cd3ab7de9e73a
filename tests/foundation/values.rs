//! Integration tests for extracted value types

use pdxscript_foundation::{Color, Date, Position};

// =============================================================================
// Position
// =============================================================================

#[test]
fn position_display_and_default() {
    assert_eq!(Position::default(), Position::start());
    assert_eq!(Position::new(12, 4).to_string(), "12:4");
}

// =============================================================================
// Date
// =============================================================================

#[test]
fn date_parse() {
    let date = Date::parse("1444.11.11").unwrap();
    assert_eq!((date.year, date.month, date.day), (1444, 11, 11));
    assert_eq!(date.to_string(), "1444.11.11");
}

#[test]
fn date_short_year() {
    assert_eq!(Date::parse("12.5.3"), Date::new(12, 5, 3));
}

#[test]
fn date_rejects_out_of_range() {
    assert_eq!(Date::parse("1444.13.1"), None);
    assert_eq!(Date::parse("1444.2.29"), None);
    assert_eq!(Date::parse("1444.4.31"), None);
    assert_eq!(Date::parse("1444.0.1"), None);
    assert_eq!(Date::parse("1444.1.0"), None);
}

#[test]
fn date_rejects_malformed() {
    assert_eq!(Date::parse("1444.11"), None);
    assert_eq!(Date::parse("1444.11.11.1"), None);
    assert_eq!(Date::parse("a.b.c"), None);
    assert_eq!(Date::parse(""), None);
}

#[test]
fn dates_order_chronologically() {
    let early = Date::parse("1337.1.1").unwrap();
    let late = Date::parse("1444.11.11").unwrap();
    assert!(early < late);
}

// =============================================================================
// Color
// =============================================================================

#[test]
fn color_rgb_display() {
    let opaque = Color::Rgb { r: 20, g: 50, b: 210, a: 255 };
    let translucent = Color::Rgb { r: 1, g: 2, b: 3, a: 4 };
    assert_eq!(opaque.to_string(), "rgb { 20 50 210 }");
    assert_eq!(translucent.to_string(), "rgb { 1 2 3 4 }");
}

#[test]
fn color_to_rgb() {
    assert_eq!(Color::Rgb { r: 1, g: 2, b: 3, a: 255 }.to_rgb(), Some((1, 2, 3)));
    assert_eq!(Color::Hsv { h: 0.0, s: 1.0, v: 1.0 }.to_rgb(), Some((255, 0, 0)));
    assert_eq!(Color::Hsv { h: 0.0, s: 0.0, v: 0.0 }.to_rgb(), Some((0, 0, 0)));
    assert_eq!(Color::Named("blue".into()).to_rgb(), None);
}
