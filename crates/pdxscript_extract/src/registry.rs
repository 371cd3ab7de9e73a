//! Read-only registries used to resolve identifiers.
//!
//! Extraction never consults global state. Callers build a [`Resolver`]
//! before extraction starts and pass it in; it is only ever read, so one
//! resolver can serve many files checked in parallel.

use std::collections::{HashMap, HashSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kinds of object a key can refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegistryKind {
    /// A map location.
    Location,
    /// A group of locations.
    Area,
    /// A group of areas.
    Region,
    /// A province.
    Province,
    /// A language.
    Language,
    /// A dialect of a language.
    Dialect,
    /// A religious school.
    ReligiousSchool,
    /// A culture.
    Culture,
    /// A country rank.
    CountryRank,
    /// A modifier definition.
    ModifierDefinition,
    /// A symbolic color.
    NamedColor,
}

impl RegistryKind {
    /// Every kind, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::Location,
        Self::Area,
        Self::Region,
        Self::Province,
        Self::Language,
        Self::Dialect,
        Self::ReligiousSchool,
        Self::Culture,
        Self::CountryRank,
        Self::ModifierDefinition,
        Self::NamedColor,
    ];

    /// Human-readable name, used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Area => "area",
            Self::Region => "region",
            Self::Province => "province",
            Self::Language => "language",
            Self::Dialect => "dialect",
            Self::ReligiousSchool => "religious school",
            Self::Culture => "culture",
            Self::CountryRank => "country rank",
            Self::ModifierDefinition => "modifier definition",
            Self::NamedColor => "named color",
        }
    }

    /// Looks a kind up by its name, with `_` standing for spaces
    /// (`religious_school`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().replace(' ', "_").eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved reference to an object in a registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectKey {
    /// Which registry the key was resolved in.
    pub kind: RegistryKind,
    /// The key itself.
    pub key: String,
}

impl ObjectKey {
    /// Creates a key.
    #[must_use]
    pub fn new(kind: RegistryKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.key)
    }
}

/// Key presence lookups against pre-populated registries.
pub trait Resolver: Send + Sync {
    /// Returns true if `key` names an object of `kind`.
    fn contains(&self, kind: RegistryKind, key: &str) -> bool;
}

/// In-memory registries, one key set per kind.
#[derive(Clone, Debug, Default)]
pub struct Registries {
    entries: HashMap<RegistryKind, HashSet<String>>,
}

impl Registries {
    /// Creates empty registries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one key.
    pub fn insert(&mut self, kind: RegistryKind, key: impl Into<String>) {
        self.entries.entry(kind).or_default().insert(key.into());
    }

    /// Builder method to add many keys of one kind.
    #[must_use]
    pub fn with<I, S>(mut self, kind: RegistryKind, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = self.entries.entry(kind).or_default();
        set.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Number of keys of `kind`.
    #[must_use]
    pub fn len(&self, kind: RegistryKind) -> usize {
        self.entries.get(&kind).map_or(0, HashSet::len)
    }

    /// Returns true if no keys of any kind are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashSet::is_empty)
    }
}

impl Resolver for Registries {
    fn contains(&self, kind: RegistryKind, key: &str) -> bool {
        self.entries.get(&kind).is_some_and(|keys| keys.contains(key))
    }
}
