//! Integration tests for country definitions

use pdxscript_extract::{
    COUNTRY_FIELDS, CountryDefinition, ExtractConfig, Government, ObjectKey, Registries,
    RegistryKind,
};
use pdxscript_foundation::{Color, DiagnosticCode};

use crate::extract;

const COUNTRIES: &str = r#"
FRA = {
    color = rgb { 20 50 210 }
    capital = paris
    culture_definition = french
    government = monarchy
    name = { key = "FRA_name" }
    flags = { crusader }
}

VEN = {
    color = hsv360 { 200 60 80 }
    capital = venezia
    culture_definition = venetian
    government = republic
    home_area = veneto_area
}

HRE = {
    color = imperial_gold
    culture_definition = german
    government = elective
}
"#;

fn registries() -> Registries {
    Registries::new()
        .with(RegistryKind::Location, ["paris", "venezia"])
        .with(RegistryKind::Culture, ["french", "venetian", "german"])
        .with(RegistryKind::NamedColor, ["imperial_gold"])
}

#[test]
fn extract_a_file_of_countries() {
    let (countries, diagnostics) = extract(COUNTRIES, &registries(), ExtractConfig::default(), |ex, doc| {
        doc.statements()
            .iter()
            .map(|&id| CountryDefinition::extract(ex, id))
            .collect::<Vec<_>>()
    });

    let tags: Vec<_> = countries.iter().map(|(c, _)| c.tag.as_str()).collect();
    assert_eq!(tags, vec!["FRA", "VEN", "HRE"]);

    let (france, validity) = &countries[0];
    assert!(validity.is_valid());
    assert_eq!(france.government, Some(Government::Monarchy));
    assert_eq!(france.name.as_ref().map(|n| n.key.as_str()), Some("FRA_name"));
    assert_eq!(france.flags, vec!["crusader"]);

    let (venice, validity) = &countries[1];
    assert!(!validity.is_valid());
    assert_eq!(venice.capital, Some(ObjectKey::new(RegistryKind::Location, "venezia")));
    assert!(matches!(venice.color, Some(Color::Hsv { .. })));
    assert_eq!(venice.home_area, None);

    let (empire, validity) = &countries[2];
    assert_eq!(validity.failures(), 1);
    assert_eq!(empire.color, Some(Color::Named("imperial_gold".into())));
    assert_eq!(empire.government, None);

    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![DiagnosticCode::InvalidObjectKey, DiagnosticCode::InvalidEnumValue]
    );
    assert_eq!(diagnostics[0].args, vec!["veneto_area", "area"]);
    assert_eq!(diagnostics[1].position.line, 22);
}

#[test]
fn field_table_is_consistent() {
    let required: Vec<_> = COUNTRY_FIELDS
        .iter()
        .filter(|field| field.required)
        .map(|field| field.key)
        .collect();
    assert_eq!(required, vec!["color", "culture_definition"]);

    let mut keys: Vec<_> = COUNTRY_FIELDS.iter().map(|field| field.key).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), COUNTRY_FIELDS.len());
}
