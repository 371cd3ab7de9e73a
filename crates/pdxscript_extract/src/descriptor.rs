//! Declarative field tables.
//!
//! A domain type lists its fields once in a static table of
//! [`FieldDescriptor`]s. [`Extractor::drive`] walks a block's children,
//! dispatches each to its descriptor's parser, and reports unknown,
//! duplicated, misshapen and missing fields.
//!
//! A field is handled one of three ways:
//! - a custom [`FieldParser`] converts and stores the value;
//! - an embedded field fills a nested [`Record`] from that record's own table;
//! - a field with neither is checked against its shape and otherwise ignored.

use pdxscript_foundation::DiagnosticCode;
use pdxscript_language::{Statement, StatementId};

use crate::extractor::{Extractor, Separators};
use crate::validity::Validity;

/// The statement shape a field must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldShape {
    /// `key = value` or `key >= value`.
    Content,
    /// `key = { ... }` or `key { ... }`.
    Block,
    /// Any statement; the parser checks the shape itself.
    Any,
}

impl FieldShape {
    /// Returns true if `statement` has this shape.
    #[must_use]
    pub const fn accepts(self, statement: &Statement) -> bool {
        match self {
            Self::Content => matches!(statement, Statement::Content(_)),
            Self::Block => matches!(statement, Statement::Block(_)),
            Self::Any => true,
        }
    }

    /// The shape as named in diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Content => "a content pair",
            Self::Block => "a block",
            Self::Any => "a statement",
        }
    }
}

/// Parses one field's statement into the target object.
///
/// Receives the extractor, the statement, the action name for diagnostics,
/// and the object being filled.
pub type FieldParser<T> = fn(&mut Extractor<'_>, StatementId, &str, &mut T) -> Option<()>;

/// Drives an embedded record: receives the block's children and the nested
/// object name.
pub type EmbeddedDriver<T> = fn(&mut Extractor<'_>, &[StatementId], &str, &mut T) -> Validity;

/// A type filled from its own field table.
pub trait Record: Sized + 'static {
    /// The record's fields.
    const FIELDS: &'static [FieldDescriptor<Self>];
}

/// An object that holds an embedded record of type `R`.
///
/// One embedding per record type; a parent with two fields of the same
/// record type writes a custom parser for the second.
pub trait Embeds<R: Record> {
    /// The embedded record to fill.
    fn embedded(&mut self) -> &mut R;
}

fn drive_embedded<T: Embeds<R>, R: Record>(
    ex: &mut Extractor<'_>,
    children: &[StatementId],
    object: &str,
    target: &mut T,
) -> Validity {
    ex.drive(children, R::FIELDS, target.embedded(), object)
}

/// One entry of a field table.
pub struct FieldDescriptor<T> {
    /// The statement key that selects this field.
    pub key: &'static str,
    /// The statement shape the field requires.
    pub shape: FieldShape,
    /// The field's custom parser, if any.
    pub parse: Option<FieldParser<T>>,
    /// Set for a field whose block fills a nested record.
    pub embedded: Option<EmbeddedDriver<T>>,
    /// Whether the key may appear more than once.
    pub repeatable: bool,
    /// Whether the key must appear.
    pub required: bool,
}

impl<T> FieldDescriptor<T> {
    /// A field of the given shape with the default parser: the shape is
    /// checked, a content pair must use `=`, and the value is not stored.
    #[must_use]
    pub const fn shaped(key: &'static str, shape: FieldShape) -> Self {
        Self {
            key,
            shape,
            parse: None,
            embedded: None,
            repeatable: false,
            required: false,
        }
    }

    /// A field written as `key = value`.
    #[must_use]
    pub const fn content(key: &'static str, parse: FieldParser<T>) -> Self {
        Self::shaped(key, FieldShape::Content).with_parser(parse)
    }

    /// A field written as `key = { ... }`.
    #[must_use]
    pub const fn block(key: &'static str, parse: FieldParser<T>) -> Self {
        Self::shaped(key, FieldShape::Block).with_parser(parse)
    }

    /// A field of any shape.
    #[must_use]
    pub const fn any(key: &'static str, parse: FieldParser<T>) -> Self {
        Self::shaped(key, FieldShape::Any).with_parser(parse)
    }

    /// A block field whose children fill the embedded record `R`.
    #[must_use]
    pub const fn embedded<R: Record>(key: &'static str) -> Self
    where
        T: Embeds<R>,
    {
        let mut field = Self::shaped(key, FieldShape::Block);
        field.embedded = Some(drive_embedded::<T, R>);
        field
    }

    /// Replaces the field's parser.
    #[must_use]
    pub const fn with_parser(mut self, parse: FieldParser<T>) -> Self {
        self.parse = Some(parse);
        self
    }

    /// Marks the field as allowed to repeat.
    #[must_use]
    pub const fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldDescriptor<T> {}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("shape", &self.shape)
            .field("custom_parser", &self.parse.is_some())
            .field("embedded", &self.embedded.is_some())
            .field("repeatable", &self.repeatable)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

impl Extractor<'_> {
    /// Fills `target` from `statements` using a field table.
    ///
    /// `object` names the object in diagnostics and prefixes every action
    /// (`country.capital`). Missing required fields are reported at the
    /// context position current on entry. A repeated non-repeatable field
    /// is reported and then parsed again, so the last occurrence wins.
    /// Embedded records are driven recursively under `object.key`, and their
    /// failures count toward the returned validity.
    pub fn drive<T>(
        &mut self,
        statements: &[StatementId],
        fields: &[FieldDescriptor<T>],
        target: &mut T,
        object: &str,
    ) -> Validity {
        let document = self.document;
        let origin = self.cx.position();
        let mut validity = Validity::new();
        let mut seen = vec![false; fields.len()];

        log::trace!("driving {} statements of {object}", statements.len());

        for &id in statements {
            let key = document.key(id);
            let Some(index) = fields.iter().position(|field| field.key == key) else {
                if self.config.warn_unknown_fields {
                    self.report(
                        document.start(id),
                        DiagnosticCode::UnknownField,
                        object,
                        &[&key, &object],
                    );
                }
                continue;
            };
            let field = &fields[index];
            if seen[index] && !field.repeatable && self.config.warn_duplicate_fields {
                self.report(
                    document.start(id),
                    DiagnosticCode::DuplicateField,
                    object,
                    &[&key, &object],
                );
            }
            seen[index] = true;

            let action = format!("{object}.{}", field.key);
            let statement = document.statement(id);
            if !field.shape.accepts(statement) {
                self.report(
                    document.start(id),
                    DiagnosticCode::InvalidNodeType,
                    &action,
                    &[&field.shape.describe(), &statement.kind_name()],
                );
                validity.fail();
                continue;
            }

            if let Some(embed) = field.embedded {
                self.cx.set_position(document.start(id));
                validity.merge(embed(self, statement.children(), &action, target));
            } else if let Some(parse) = field.parse {
                validity.check(parse(self, id, &action, target));
            } else {
                validity.check(self.default_field(id, field.shape, &action));
            }
        }

        for (field, &present) in fields.iter().zip(&seen) {
            if !field.required || present {
                continue;
            }
            self.report(
                origin,
                DiagnosticCode::MissingRequiredField,
                object,
                &[&field.key, &object],
            );
            validity.fail();
        }

        validity
    }

    /// The parser of a field without one. The shape has already passed.
    fn default_field(&mut self, id: StatementId, shape: FieldShape, action: &str) -> Option<()> {
        match shape {
            FieldShape::Content => self.content_value(id, Separators::Equals, action).map(drop),
            FieldShape::Block | FieldShape::Any => Some(()),
        }
    }
}
