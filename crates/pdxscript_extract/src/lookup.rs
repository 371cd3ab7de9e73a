//! Identifier resolution against the injected registries.

use pdxscript_foundation::DiagnosticCode;
use pdxscript_language::{StatementId, Token, ValueId};

use crate::extractor::{Extractor, Separators};
use crate::registry::{ObjectKey, RegistryKind};

impl Extractor<'_> {
    /// Extracts an identifier and resolves it in the `kind` registry.
    pub fn object_key(&mut self, id: StatementId, kind: RegistryKind, action: &str) -> Option<ObjectKey> {
        let value = self.content_value(id, Separators::Equals, action)?;
        self.resolve_value(value, kind, action)
    }

    /// Resolves a literal value in the `kind` registry.
    pub fn resolve_value(&mut self, value: ValueId, kind: RegistryKind, action: &str) -> Option<ObjectKey> {
        let token = self.literal(value, action)?;
        self.resolve_token(token, kind, action)
    }

    /// Resolves an identifier token in the `kind` registry.
    pub(crate) fn resolve_token(&mut self, token: Token, kind: RegistryKind, action: &str) -> Option<ObjectKey> {
        let key = self.identifier_token(token, action)?;
        if self.resolver.contains(kind, &key) {
            return Some(ObjectKey::new(kind, key));
        }
        self.report(
            token.start(),
            DiagnosticCode::InvalidObjectKey,
            action,
            &[&key, &kind.name()],
        );
        None
    }

    /// Extracts a location key.
    pub fn location(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::Location, action)
    }

    /// Extracts an area key.
    pub fn area(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::Area, action)
    }

    /// Extracts a region key.
    pub fn region(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::Region, action)
    }

    /// Extracts a province key.
    pub fn province(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::Province, action)
    }

    /// Extracts a language key.
    pub fn language(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::Language, action)
    }

    /// Extracts a dialect key.
    pub fn dialect(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::Dialect, action)
    }

    /// Extracts a religious school key.
    pub fn religious_school(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::ReligiousSchool, action)
    }

    /// Extracts a culture key.
    pub fn culture(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::Culture, action)
    }

    /// Extracts a country rank key.
    pub fn country_rank(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::CountryRank, action)
    }

    /// Extracts a modifier definition key.
    pub fn modifier_definition(&mut self, id: StatementId, action: &str) -> Option<ObjectKey> {
        self.object_key(id, RegistryKind::ModifierDefinition, action)
    }
}
