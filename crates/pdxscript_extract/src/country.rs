//! Country definitions.
//!
//! ```text
//! FRA = {
//!     color = rgb { 20 50 210 }
//!     capital = paris
//!     culture_definition = french
//!     government = monarchy
//!     name = { key = FRA_name }
//!     modifiers = { tax_efficiency }
//! }
//! ```

use pdxscript_foundation::{Color, Date};
use pdxscript_language::StatementId;

use crate::assign::{PropertyTarget, PropertyValue};
use crate::descriptor::{FieldDescriptor, Record};
use crate::enums::ScriptEnum;
use crate::extractor::Extractor;
use crate::registry::{ObjectKey, RegistryKind};
use crate::structured::NameDeclaration;
use crate::validity::Validity;

crate::script_enum! {
    /// Forms of government.
    pub enum Government as "government" {
        /// Ruled by a hereditary monarch.
        Monarchy => "monarchy",
        /// Ruled by elected officials.
        Republic => "republic",
        /// Ruled by a clergy.
        Theocracy => "theocracy",
        /// Ruled by a tribal council.
        Tribe => "tribe",
        /// A nomadic horde.
        SteppeHorde => "steppe_horde",
    }
}

/// Settable properties of a [`CountryDefinition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CountryProperty {
    /// Map color.
    Color,
    /// Capital location.
    Capital,
    /// Capital province.
    CapitalProvince,
    /// Home area.
    HomeArea,
    /// Home region.
    HomeRegion,
    /// Primary culture.
    Culture,
    /// Religious school.
    ReligiousSchool,
    /// Court language.
    CourtLanguage,
    /// Liturgical dialect.
    LiturgicalDialect,
    /// Country rank.
    Rank,
    /// Form of government.
    Government,
    /// Starting stability.
    Stability,
    /// Starting gold.
    Gold,
    /// Whether the country can be played.
    Playable,
    /// Founding date.
    Founded,
    /// Permanent modifiers.
    Modifiers,
}

/// A country as declared in script.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountryDefinition {
    /// The country tag (the block key).
    pub tag: String,
    /// Map color.
    pub color: Option<Color>,
    /// Capital location.
    pub capital: Option<ObjectKey>,
    /// Capital province.
    pub capital_province: Option<ObjectKey>,
    /// Home area.
    pub home_area: Option<ObjectKey>,
    /// Home region.
    pub home_region: Option<ObjectKey>,
    /// Primary culture.
    pub culture: Option<ObjectKey>,
    /// Religious school.
    pub religious_school: Option<ObjectKey>,
    /// Court language.
    pub court_language: Option<ObjectKey>,
    /// Liturgical dialect.
    pub liturgical_dialect: Option<ObjectKey>,
    /// Country rank.
    pub rank: Option<ObjectKey>,
    /// Form of government.
    pub government: Option<Government>,
    /// Localized name.
    pub name: Option<NameDeclaration>,
    /// Starting stability.
    pub stability: Option<i64>,
    /// Starting gold.
    pub gold: Option<f64>,
    /// Whether the country can be played.
    pub playable: bool,
    /// Founding date.
    pub founded: Option<Date>,
    /// Permanent modifiers.
    pub modifiers: Vec<ObjectKey>,
    /// Free-form flags.
    pub flags: Vec<String>,
}

/// The country field table.
pub const COUNTRY_FIELDS: &[FieldDescriptor<CountryDefinition>] = &[
    FieldDescriptor::any("color", |ex, id, action, country| {
        ex.assign_color(id, country, CountryProperty::Color, action)
    })
    .required(),
    FieldDescriptor::content("capital", |ex, id, action, country| {
        ex.assign_key(id, RegistryKind::Location, country, CountryProperty::Capital, action)
    }),
    FieldDescriptor::content("capital_province", |ex, id, action, country| {
        ex.assign_key(id, RegistryKind::Province, country, CountryProperty::CapitalProvince, action)
    }),
    FieldDescriptor::content("home_area", |ex, id, action, country| {
        ex.assign_key(id, RegistryKind::Area, country, CountryProperty::HomeArea, action)
    }),
    FieldDescriptor::content("home_region", |ex, id, action, country| {
        ex.assign_key(id, RegistryKind::Region, country, CountryProperty::HomeRegion, action)
    }),
    FieldDescriptor::content("culture_definition", |ex, id, action, country| {
        ex.assign_key(id, RegistryKind::Culture, country, CountryProperty::Culture, action)
    })
    .required(),
    FieldDescriptor::content("religious_school", |ex, id, action, country| {
        ex.assign_key(id, RegistryKind::ReligiousSchool, country, CountryProperty::ReligiousSchool, action)
    }),
    FieldDescriptor::content("court_language", |ex, id, action, country| {
        ex.assign_key(id, RegistryKind::Language, country, CountryProperty::CourtLanguage, action)
    }),
    FieldDescriptor::content("liturgical_dialect", |ex, id, action, country| {
        ex.assign_key(id, RegistryKind::Dialect, country, CountryProperty::LiturgicalDialect, action)
    }),
    FieldDescriptor::content("rank", |ex, id, action, country| {
        ex.assign_key(id, RegistryKind::CountryRank, country, CountryProperty::Rank, action)
    }),
    FieldDescriptor::content("government", |ex, id, action, country| {
        ex.assign_enum::<Government, _>(id, country, CountryProperty::Government, action)
    }),
    FieldDescriptor::block("name", |ex, id, action, country: &mut CountryDefinition| {
        country.name = Some(ex.name_declaration(id, action)?);
        Some(())
    }),
    FieldDescriptor::content("stability", |ex, id, action, country| {
        ex.assign_int(id, country, CountryProperty::Stability, action)
    }),
    FieldDescriptor::content("gold", |ex, id, action, country| {
        ex.assign_float(id, country, CountryProperty::Gold, action)
    }),
    FieldDescriptor::content("playable", |ex, id, action, country| {
        ex.assign_bool(id, country, CountryProperty::Playable, action)
    }),
    FieldDescriptor::content("founded", |ex, id, action, country| {
        ex.assign_date(id, country, CountryProperty::Founded, action)
    }),
    FieldDescriptor::block("modifiers", |ex, id, action, country| {
        ex.assign_keys(id, RegistryKind::ModifierDefinition, country, CountryProperty::Modifiers, action)
    }),
    FieldDescriptor::block("flags", |ex, id, action, country: &mut CountryDefinition| {
        country.flags.extend(ex.identifier_list(id, action)?);
        Some(())
    })
    .repeatable(),
];

impl CountryDefinition {
    /// Creates an empty definition for `tag`.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Extracts a country from its `TAG = { ... }` block.
    pub fn extract(ex: &mut Extractor<'_>, id: StatementId) -> (Self, Validity) {
        let document = ex.document();
        let mut country = Self::new(document.key(id));
        let mut validity = Validity::new();
        let Some(children) = validity.check(ex.block(id, "country")) else {
            return (country, validity);
        };
        ex.context().set_position(document.start(id));
        validity.merge(ex.drive(children, Self::FIELDS, &mut country, "country"));
        log::debug!(
            "extracted country {} ({} failed fields)",
            country.tag,
            validity.failures()
        );
        (country, validity)
    }
}

impl Record for CountryDefinition {
    const FIELDS: &'static [FieldDescriptor<Self>] = COUNTRY_FIELDS;
}

impl PropertyTarget for CountryDefinition {
    type Property = CountryProperty;

    fn force_set(&mut self, property: CountryProperty, value: PropertyValue) {
        match (property, value) {
            (CountryProperty::Color, PropertyValue::Color(color)) => self.color = Some(color),
            (CountryProperty::Capital, PropertyValue::Key(key)) => self.capital = Some(key),
            (CountryProperty::CapitalProvince, PropertyValue::Key(key)) => {
                self.capital_province = Some(key);
            }
            (CountryProperty::HomeArea, PropertyValue::Key(key)) => self.home_area = Some(key),
            (CountryProperty::HomeRegion, PropertyValue::Key(key)) => self.home_region = Some(key),
            (CountryProperty::Culture, PropertyValue::Key(key)) => self.culture = Some(key),
            (CountryProperty::ReligiousSchool, PropertyValue::Key(key)) => {
                self.religious_school = Some(key);
            }
            (CountryProperty::CourtLanguage, PropertyValue::Key(key)) => {
                self.court_language = Some(key);
            }
            (CountryProperty::LiturgicalDialect, PropertyValue::Key(key)) => {
                self.liturgical_dialect = Some(key);
            }
            (CountryProperty::Rank, PropertyValue::Key(key)) => self.rank = Some(key),
            (CountryProperty::Government, PropertyValue::Symbol(symbol)) => {
                self.government = Government::from_lexeme(symbol);
            }
            (CountryProperty::Stability, PropertyValue::Int(n)) => self.stability = Some(n),
            (CountryProperty::Gold, PropertyValue::Float(n)) => self.gold = Some(n),
            (CountryProperty::Playable, PropertyValue::Bool(b)) => self.playable = b,
            (CountryProperty::Founded, PropertyValue::Date(date)) => self.founded = Some(date),
            (CountryProperty::Modifiers, PropertyValue::Keys(keys)) => self.modifiers = keys,
            (property, value) => {
                log::warn!("country {}: ignoring {value:?} for {property:?}", self.tag);
            }
        }
    }
}
