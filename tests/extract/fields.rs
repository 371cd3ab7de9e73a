//! Integration tests for field tables and script enums declared outside the
//! extraction crate.

use pdxscript_extract::{
    Embeds, ExtractConfig, FieldDescriptor, FieldShape, PropertyTarget, PropertyValue, Record,
    Registries, RegistryKind, ScriptEnum, Validity,
};
use pdxscript_foundation::{DiagnosticCode, Position};

use crate::{extract, nth};

pdxscript_extract::script_enum! {
    /// Terrain of a location.
    pub enum Terrain as "terrain" {
        /// Open ground.
        Plains => "plains",
        /// Rough ground.
        Hills => "hills",
        /// Impassable.
        Mountains => "mountains",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LocationProperty {
    Terrain,
    Development,
    Area,
}

#[derive(Debug, Default)]
struct Market {
    goods: Option<String>,
    size: Option<i64>,
}

impl Record for Market {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::content("goods", |ex, id, action, market: &mut Market| {
            market.goods = Some(ex.identifier(id, action)?);
            Some(())
        }),
        FieldDescriptor::content("size", |ex, id, action, market: &mut Market| {
            market.size = Some(ex.int(id, action)?);
            Some(())
        })
        .required(),
    ];
}

#[derive(Debug, Default)]
struct Location {
    terrain: Option<&'static str>,
    development: Option<i64>,
    area: Option<String>,
    tags: Vec<String>,
    market: Market,
}

impl Embeds<Market> for Location {
    fn embedded(&mut self) -> &mut Market {
        &mut self.market
    }
}

impl PropertyTarget for Location {
    type Property = LocationProperty;

    fn force_set(&mut self, property: LocationProperty, value: PropertyValue) {
        match (property, value) {
            (LocationProperty::Terrain, PropertyValue::Symbol(symbol)) => self.terrain = Some(symbol),
            (LocationProperty::Development, PropertyValue::Int(n)) => self.development = Some(n),
            (LocationProperty::Area, PropertyValue::Key(key)) => self.area = Some(key.key),
            (property, value) => panic!("{property:?} cannot hold {value:?}"),
        }
    }
}

const LOCATION_FIELDS: &[FieldDescriptor<Location>] = &[
    FieldDescriptor::content("terrain", |ex, id, action, location| {
        ex.assign_enum::<Terrain, _>(id, location, LocationProperty::Terrain, action)
    })
    .required(),
    FieldDescriptor::content("development", |ex, id, action, location| {
        ex.assign_int(id, location, LocationProperty::Development, action)
    }),
    FieldDescriptor::content("area", |ex, id, action, location| {
        ex.assign_key(id, RegistryKind::Area, location, LocationProperty::Area, action)
    }),
    FieldDescriptor::block("tags", |ex, id, action, location: &mut Location| {
        location.tags.extend(ex.identifier_list(id, action)?);
        Some(())
    })
    .repeatable(),
    FieldDescriptor::embedded::<Market>("market"),
    FieldDescriptor::shaped("comment", FieldShape::Content),
];

fn registries() -> Registries {
    Registries::new().with(RegistryKind::Area, ["ile_de_france"])
}

fn drive(
    source: &str,
    config: ExtractConfig,
) -> ((Location, Validity), Vec<pdxscript_foundation::Diagnostic>) {
    extract(source, &registries(), config, |ex, doc| {
        let id = nth(doc, 0);
        let mut location = Location::default();
        let children = doc.statement(id).children().to_vec();
        ex.context().set_position(doc.start(id));
        let validity = ex.drive(&children, LOCATION_FIELDS, &mut location, "location");
        (location, validity)
    })
}

// =============================================================================
// Script enums
// =============================================================================

#[test]
fn script_enum_lookup() {
    assert_eq!(Terrain::NAME, "terrain");
    assert_eq!(Terrain::from_lexeme("Hills"), Some(Terrain::Hills));
    assert_eq!(Terrain::from_lexeme("swamp"), None);
    assert_eq!(Terrain::Mountains.script_name(), "mountains");
    assert_eq!(Terrain::legal_values(), "plains, hills, mountains");
}

#[test]
fn invalid_enum_lists_legal_values() {
    let ((_, validity), diagnostics) = drive("paris = { terrain = swamp }", ExtractConfig::default());
    assert!(!validity.is_valid());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidEnumValue);
    assert_eq!(diagnostics[0].args, vec!["swamp", "terrain", "plains, hills, mountains"]);
}

// =============================================================================
// Field tables
// =============================================================================

#[test]
fn drive_fills_every_field() {
    let ((location, validity), diagnostics) = drive(
        "paris = { terrain = plains development = 30 area = ile_de_france tags = { capital } tags = { port } }",
        ExtractConfig::default(),
    );
    assert!(validity.is_valid(), "{diagnostics:?}");
    assert!(diagnostics.is_empty());
    assert_eq!(location.terrain, Some("plains"));
    assert_eq!(location.development, Some(30));
    assert_eq!(location.area.as_deref(), Some("ile_de_france"));
    assert_eq!(location.tags, vec!["capital", "port"]);
}

#[test]
fn missing_required_field_is_reported_at_the_block() {
    let ((_, validity), diagnostics) = drive("\n  paris = { development = 3 }", ExtractConfig::default());
    assert_eq!(validity.failures(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::MissingRequiredField);
    assert_eq!(diagnostics[0].position, Position::new(2, 3));
    assert_eq!(diagnostics[0].action, "location");
}

#[test]
fn failures_accumulate_across_fields() {
    let ((location, validity), diagnostics) = drive(
        "paris = { terrain = hills development = lots area = atlantis tags = { 7 } }",
        ExtractConfig::default(),
    );
    assert_eq!(validity.failures(), 3);
    assert_eq!(location.terrain, Some("hills"));
    let actions: Vec<_> = diagnostics.iter().map(|d| d.action.as_str()).collect();
    assert_eq!(actions, vec!["location.development", "location.area", "location.tags"]);
}

#[test]
fn warnings_can_be_switched_off() {
    let source = "paris = { terrain = plains terrain = hills climate = mild }";

    let ((location, validity), diagnostics) = drive(source, ExtractConfig::default());
    assert!(validity.is_valid());
    assert_eq!(location.terrain, Some("hills"));
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![DiagnosticCode::DuplicateField, DiagnosticCode::UnknownField]);

    let quiet = ExtractConfig::default()
        .with_warn_unknown_fields(false)
        .with_warn_duplicate_fields(false);
    let ((_, validity), diagnostics) = drive(source, quiet);
    assert!(validity.is_valid());
    assert!(diagnostics.is_empty());
}

#[test]
fn shape_mismatch() {
    let ((_, validity), diagnostics) = drive("paris = { terrain = plains tags = capital }", ExtractConfig::default());
    assert!(!validity.is_valid());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidNodeType);
    assert_eq!(diagnostics[0].args, vec!["a block", "content pair"]);
}

#[test]
fn embedded_record_fills_from_its_own_table() {
    let ((location, validity), diagnostics) = drive(
        r#"paris = { terrain = plains market = { goods = wine size = 2 } comment = "old capital" }"#,
        ExtractConfig::default(),
    );
    assert!(validity.is_valid(), "{diagnostics:?}");
    assert!(diagnostics.is_empty());
    assert_eq!(location.market.goods.as_deref(), Some("wine"));
    assert_eq!(location.market.size, Some(2));
}

#[test]
fn embedded_record_reports_under_a_nested_name() {
    let ((location, validity), diagnostics) = drive(
        "paris = { terrain = plains market = { goods = 5 price = 3 } }",
        ExtractConfig::default(),
    );
    assert_eq!(validity.failures(), 2);
    assert_eq!(location.terrain, Some("plains"));
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::ExpectedIdentifier,
            DiagnosticCode::UnknownField,
            DiagnosticCode::MissingRequiredField,
        ]
    );
    assert_eq!(diagnostics[0].action, "location.market.goods");
    assert_eq!(diagnostics[1].args, vec!["price", "location.market"]);
    assert_eq!(diagnostics[2].args, vec!["size", "location.market"]);
    assert_eq!(diagnostics[2].position, Position::new(1, 28));
}

#[test]
fn default_parsed_field_is_checked_not_stored() {
    let ((_, validity), diagnostics) = drive(
        "paris = { terrain = plains comment = { old capital } }",
        ExtractConfig::default(),
    );
    assert_eq!(validity.failures(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidNodeType);
    assert_eq!(diagnostics[0].args, vec!["a content pair", "block"]);

    let ((_, validity), diagnostics) =
        drive("paris = { terrain = plains comment < 3 }", ExtractConfig::default());
    assert_eq!(validity.failures(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidSeparator);
    assert_eq!(diagnostics[0].args[1], "<");
}
