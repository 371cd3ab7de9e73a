//! Typed extraction and validation of pdxscript syntax trees.
//!
//! This crate turns syntax nodes into typed values:
//! - `Extractor` - Shape checks and primitive conversions, one diagnostic per failure
//! - `Validity` - Pass/fail accumulator across the fields of one object
//! - `Resolver` / `Registries` - Injected read-only identifier lookups
//! - `FieldDescriptor` / `Record` - Static field tables driven by `Extractor::drive`
//! - `PropertyTarget` - Extract-and-assign into an external object model
//! - `CountryDefinition` - A complete domain object built on the above

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assign;
pub mod color;
pub mod config;
pub mod country;
pub mod descriptor;
pub mod enums;
pub mod extractor;
pub mod lookup;
pub mod primitives;
pub mod registry;
pub mod structured;
pub mod toolbox;
pub mod validity;

pub use assign::{PropertyTarget, PropertyValue};
pub use color::ACCEPTED_COLOR_FORMS;
pub use config::ExtractConfig;
pub use country::{COUNTRY_FIELDS, CountryDefinition, CountryProperty, Government};
pub use descriptor::{EmbeddedDriver, Embeds, FieldDescriptor, FieldParser, FieldShape, Record};
pub use enums::ScriptEnum;
pub use extractor::{Extractor, Separators};
pub use primitives::parse_bool;
pub use registry::{ObjectKey, Registries, RegistryKind, Resolver};
pub use structured::NameDeclaration;
pub use validity::Validity;
