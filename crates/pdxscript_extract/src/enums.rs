//! Enumerated values written as identifiers.

use pdxscript_foundation::DiagnosticCode;
use pdxscript_language::StatementId;

use crate::extractor::{Extractor, Separators};

/// An enumeration whose members are written as identifiers in script.
///
/// Usually declared with [`script_enum!`](crate::script_enum).
pub trait ScriptEnum: Copy + PartialEq + 'static {
    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Every member with its script spelling.
    const MEMBERS: &'static [(&'static str, Self)];

    /// Looks a lexeme up, ignoring ASCII case.
    #[must_use]
    fn from_lexeme(lexeme: &str) -> Option<Self> {
        Self::MEMBERS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(lexeme))
            .map(|&(_, member)| member)
    }

    /// The script spelling of this member.
    #[must_use]
    fn script_name(self) -> &'static str {
        Self::MEMBERS
            .iter()
            .find(|&&(_, member)| member == self)
            .map_or("", |&(name, _)| name)
    }

    /// Every legal spelling, comma separated.
    #[must_use]
    fn legal_values() -> String {
        Self::MEMBERS
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Declares a fieldless enum and implements [`ScriptEnum`] for it.
///
/// ```
/// pdxscript_extract::script_enum! {
///     /// Terrain types.
///     pub enum Terrain as "terrain" {
///         /// Open ground.
///         Plains => "plains",
///         /// Rough ground.
///         Hills => "hills",
///     }
/// }
///
/// use pdxscript_extract::ScriptEnum;
/// assert_eq!(Terrain::from_lexeme("HILLS"), Some(Terrain::Hills));
/// ```
#[macro_export]
macro_rules! script_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $script:literal {
            $(
                $(#[$member_meta:meta])*
                $member:ident => $lexeme:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$member_meta])*
                $member,
            )+
        }

        impl $crate::ScriptEnum for $name {
            const NAME: &'static str = $script;
            const MEMBERS: &'static [(&'static str, Self)] = &[$(($lexeme, Self::$member)),+];
        }
    };
}

impl Extractor<'_> {
    /// Extracts a member of `E`, matching case-insensitively.
    pub fn enumeration<E: ScriptEnum>(&mut self, id: StatementId, action: &str) -> Option<E> {
        let value = self.content_value(id, Separators::Equals, action)?;
        let token = self.literal(value, action)?;
        let lexeme = self.lexeme(token);
        let member = E::from_lexeme(lexeme);
        if member.is_none() {
            self.report(
                token.start(),
                DiagnosticCode::InvalidEnumValue,
                action,
                &[&lexeme, &E::NAME, &E::legal_values()],
            );
        }
        member
    }
}
