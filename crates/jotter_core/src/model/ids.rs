//! Validated identifier newtypes.
//!
//! # Responsibility
//! - Provide distinct `UserId` / `NoteId` types that can only be produced by
//!   parsing, so unvalidated strings are rejected at call sites.
//!
//! # Invariants
//! - Both identifiers are non-empty strings.
//! - Identity values are opaque: no format beyond non-emptiness is assumed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Parse failure for identifier newtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty(&'static str),
}

impl Display for IdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
        }
    }
}

impl Error for IdError {}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validates and wraps a raw identifier string.
            pub fn parse(raw: impl Into<String>) -> Result<Self, IdError> {
                let raw = raw.into();
                if raw.is_empty() {
                    return Err(IdError::Empty($label));
                }
                Ok(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Authenticated user identity supplied by the identity provider.
    UserId,
    "user id"
);

opaque_id!(
    /// Server-generated note identity.
    NoteId,
    "note id"
);

impl NoteId {
    /// Generates a fresh random identifier for a new note row.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{IdError, NoteId, UserId};

    #[test]
    fn parse_rejects_empty_values() {
        assert_eq!(UserId::parse(""), Err(IdError::Empty("user id")));
        assert_eq!(NoteId::parse(String::new()), Err(IdError::Empty("note id")));
    }

    #[test]
    fn parse_keeps_value_verbatim() {
        let id = UserId::parse(" discord:42 ").unwrap();
        assert_eq!(id.as_str(), " discord:42 ");
    }

    #[test]
    fn generated_note_ids_are_unique_and_non_empty() {
        let first = NoteId::generate();
        let second = NoteId::generate();
        assert!(!first.as_str().is_empty());
        assert_ne!(first, second);
    }

    #[test]
    fn serde_rejects_empty_identifier() {
        let ok: NoteId = serde_json::from_str("\"n-1\"").unwrap();
        assert_eq!(ok.as_str(), "n-1");
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"n-1\"");
    }
}
