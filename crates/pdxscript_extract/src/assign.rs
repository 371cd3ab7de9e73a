//! Extract-and-assign wrappers.
//!
//! Downstream object models expose a single property setter keyed by an
//! enumerated property identifier. The `assign_*` operations extract a value
//! and call that setter only when extraction succeeds.

use pdxscript_foundation::{Color, Date};
use pdxscript_language::StatementId;

use crate::enums::ScriptEnum;
use crate::extractor::Extractor;
use crate::registry::{ObjectKey, RegistryKind};

/// A value being written into an object model.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// Free text or an identifier.
    Text(String),
    /// A date.
    Date(Date),
    /// A color.
    Color(Color),
    /// An enum member, by script spelling.
    Symbol(&'static str),
    /// A resolved registry key.
    Key(ObjectKey),
    /// A list of resolved registry keys.
    Keys(Vec<ObjectKey>),
}

/// An object whose properties can be set by identifier.
pub trait PropertyTarget {
    /// The property identifiers of this object.
    type Property: Copy;

    /// Sets one property, replacing any previous value.
    fn force_set(&mut self, property: Self::Property, value: PropertyValue);
}

impl Extractor<'_> {
    fn assign<P: PropertyTarget>(
        target: &mut P,
        property: P::Property,
        value: Option<PropertyValue>,
    ) -> Option<()> {
        target.force_set(property, value?);
        Some(())
    }

    /// Extracts an integer into `property`.
    pub fn assign_int<P: PropertyTarget>(
        &mut self,
        id: StatementId,
        target: &mut P,
        property: P::Property,
        action: &str,
    ) -> Option<()> {
        let value = self.int(id, action).map(PropertyValue::Int);
        Self::assign(target, property, value)
    }

    /// Extracts a float into `property`.
    pub fn assign_float<P: PropertyTarget>(
        &mut self,
        id: StatementId,
        target: &mut P,
        property: P::Property,
        action: &str,
    ) -> Option<()> {
        let value = self.float(id, action).map(PropertyValue::Float);
        Self::assign(target, property, value)
    }

    /// Extracts a boolean into `property`.
    pub fn assign_bool<P: PropertyTarget>(
        &mut self,
        id: StatementId,
        target: &mut P,
        property: P::Property,
        action: &str,
    ) -> Option<()> {
        let value = self.bool(id, action).map(PropertyValue::Bool);
        Self::assign(target, property, value)
    }

    /// Extracts a literal's text into `property`.
    pub fn assign_string<P: PropertyTarget>(
        &mut self,
        id: StatementId,
        target: &mut P,
        property: P::Property,
        action: &str,
    ) -> Option<()> {
        let value = self.string(id, action).map(PropertyValue::Text);
        Self::assign(target, property, value)
    }

    /// Extracts a date into `property`.
    pub fn assign_date<P: PropertyTarget>(
        &mut self,
        id: StatementId,
        target: &mut P,
        property: P::Property,
        action: &str,
    ) -> Option<()> {
        let value = self.date(id, action).map(PropertyValue::Date);
        Self::assign(target, property, value)
    }

    /// Extracts a color into `property`.
    pub fn assign_color<P: PropertyTarget>(
        &mut self,
        id: StatementId,
        target: &mut P,
        property: P::Property,
        action: &str,
    ) -> Option<()> {
        let value = self.color(id, action).map(PropertyValue::Color);
        Self::assign(target, property, value)
    }

    /// Extracts an enum member into `property`.
    pub fn assign_enum<E: ScriptEnum, P: PropertyTarget>(
        &mut self,
        id: StatementId,
        target: &mut P,
        property: P::Property,
        action: &str,
    ) -> Option<()> {
        let value = self
            .enumeration::<E>(id, action)
            .map(|member| PropertyValue::Symbol(member.script_name()));
        Self::assign(target, property, value)
    }

    /// Extracts a registry key into `property`.
    pub fn assign_key<P: PropertyTarget>(
        &mut self,
        id: StatementId,
        kind: RegistryKind,
        target: &mut P,
        property: P::Property,
        action: &str,
    ) -> Option<()> {
        let value = self.object_key(id, kind, action).map(PropertyValue::Key);
        Self::assign(target, property, value)
    }

    /// Extracts a list of registry keys into `property`.
    pub fn assign_keys<P: PropertyTarget>(
        &mut self,
        id: StatementId,
        kind: RegistryKind,
        target: &mut P,
        property: P::Property,
        action: &str,
    ) -> Option<()> {
        let value = self.key_list(id, kind, action).map(PropertyValue::Keys);
        Self::assign(target, property, value)
    }
}
