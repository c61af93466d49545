//! Strongly-typed identifier value objects.
//!
//! Identifiers appear as segments of persisted reminder keys
//! (`cardId:benefitDefinitionId:cycle:kind`), so they may not be empty and
//! may not contain the `:` separator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Separator between the segments of a persisted reminder key.
pub const KEY_SEPARATOR: char = ':';

/// Segment used when a key is not specific to a card or benefit.
pub const WILDCARD_SEGMENT: &str = "*";

fn validate_segment(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if value.contains(KEY_SEPARATOR) {
        return Err(ValidationError::invalid_format(
            field,
            format!("must not contain '{}'", KEY_SEPARATOR),
        ));
    }
    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, rejecting empty values and key separators.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                validate_segment($field, &id)?;
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// Identifier of a financial card in the user's collection.
    CardId,
    "card_id"
);

string_id!(
    /// Identifier of a benefit definition in the catalog.
    BenefitDefinitionId,
    "benefit_definition_id"
);

string_id!(
    /// Identifier of a per-user perk instance.
    PerkId,
    "perk_id"
);

impl CardId {
    /// Key segment for reminders that are not tied to one card.
    pub fn any() -> Self {
        Self(WILDCARD_SEGMENT.to_string())
    }
}

impl BenefitDefinitionId {
    /// Key segment for reminders that are not tied to one benefit.
    pub fn any() -> Self {
        Self(WILDCARD_SEGMENT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_id_accepts_plain_value() {
        let id = CardId::new("amex-gold").unwrap();
        assert_eq!(id.as_str(), "amex-gold");
        assert_eq!(id.to_string(), "amex-gold");
    }

    #[test]
    fn card_id_rejects_empty_value() {
        assert!(matches!(
            CardId::new(""),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn benefit_id_rejects_key_separator() {
        assert!(matches!(
            BenefitDefinitionId::new("uber:cash"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn wildcard_ids_use_star_segment() {
        assert_eq!(CardId::any().as_str(), "*");
        assert_eq!(BenefitDefinitionId::any().as_str(), "*");
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = PerkId::new("perk-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"perk-1\"");
    }

    #[test]
    fn deserialization_validates_ids() {
        assert!(serde_json::from_str::<CardId>("\"a:b\"").is_err());
        let id: CardId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
    }
}
