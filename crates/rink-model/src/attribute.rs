//! Target attributes of a player record.
//!
//! The set of attributes a CSV column can be mapped to is closed: every
//! destination field is an [`AttributeKey`] variant, declared in catalog
//! order. Catalog order is significant, it breaks ties in the field mapper
//! and orders the `missing_required` list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Canonical key of a player attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    FirstName,
    LastName,
    Email,
    Phone,
    BirthDate,
    Position,
    JerseyNumber,
    ParentName,
    ParentPhone,
    ParentEmail,
    EmergencyContact,
    MedicalNotes,
    IsActive,
}

impl AttributeKey {
    /// All keys in catalog order.
    pub const ALL: [AttributeKey; 13] = [
        AttributeKey::FirstName,
        AttributeKey::LastName,
        AttributeKey::Email,
        AttributeKey::Phone,
        AttributeKey::BirthDate,
        AttributeKey::Position,
        AttributeKey::JerseyNumber,
        AttributeKey::ParentName,
        AttributeKey::ParentPhone,
        AttributeKey::ParentEmail,
        AttributeKey::EmergencyContact,
        AttributeKey::MedicalNotes,
        AttributeKey::IsActive,
    ];

    /// Returns the snake_case name used in records and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::FirstName => "first_name",
            AttributeKey::LastName => "last_name",
            AttributeKey::Email => "email",
            AttributeKey::Phone => "phone",
            AttributeKey::BirthDate => "birth_date",
            AttributeKey::Position => "position",
            AttributeKey::JerseyNumber => "jersey_number",
            AttributeKey::ParentName => "parent_name",
            AttributeKey::ParentPhone => "parent_phone",
            AttributeKey::ParentEmail => "parent_email",
            AttributeKey::EmergencyContact => "emergency_contact",
            AttributeKey::MedicalNotes => "medical_notes",
            AttributeKey::IsActive => "is_active",
        }
    }

    /// Only the player's names are required.
    pub fn is_required(&self) -> bool {
        matches!(self, AttributeKey::FirstName | AttributeKey::LastName)
    }

    /// Value conversion applied when materializing this attribute.
    pub fn coercion(&self) -> Coercion {
        match self {
            AttributeKey::Position => Coercion::Position,
            AttributeKey::JerseyNumber => Coercion::JerseyNumber,
            AttributeKey::IsActive => Coercion::Active,
            _ => Coercion::Text,
        }
    }

    /// Required keys in catalog order.
    pub fn required() -> impl Iterator<Item = AttributeKey> {
        Self::ALL.into_iter().filter(AttributeKey::is_required)
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownAttribute(trimmed.to_string()))
    }
}

/// How a raw cell value becomes an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coercion {
    /// Trimmed string, passed through unchanged.
    Text,
    /// Free-text position synonym to [`Position`].
    Position,
    /// Integral number in `0..=99`.
    JerseyNumber,
    /// Truthy synonym to boolean.
    Active,
}

/// Playing position of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Forward,
    Defense,
    Goalie,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Forward => "forward",
            Position::Defense => "defense",
            Position::Goalie => "goalie",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Position::Forward),
            "defense" => Ok(Position::Defense),
            "goalie" => Ok(Position::Goalie),
            other => Err(ModelError::UnknownPosition(other.to_string())),
        }
    }
}

/// One entry of the target catalog: a destination attribute and the
/// header spellings known to refer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAttribute {
    pub key: AttributeKey,
    /// Known header spellings, in preference order.
    pub synonyms: Vec<String>,
    pub required: bool,
}

impl TargetAttribute {
    /// Creates an attribute entry; `required` follows the key.
    pub fn new<I, S>(key: AttributeKey, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let synonyms = synonyms
            .into_iter()
            .map(|s| {
                let s: String = s.into();
                s.trim().to_string()
            })
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            key,
            synonyms,
            required: key.is_required(),
        }
    }

    pub fn coercion(&self) -> Coercion {
        self.key.coercion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_is_declaration_order() {
        let mut sorted = AttributeKey::ALL;
        sorted.sort();
        assert_eq!(sorted, AttributeKey::ALL);
        assert_eq!(AttributeKey::ALL[0], AttributeKey::FirstName);
        assert_eq!(AttributeKey::ALL[12], AttributeKey::IsActive);
    }

    #[test]
    fn only_names_are_required() {
        let required: Vec<AttributeKey> = AttributeKey::required().collect();
        assert_eq!(
            required,
            vec![AttributeKey::FirstName, AttributeKey::LastName]
        );
    }

    #[test]
    fn parses_attribute_names() {
        assert_eq!(
            "jersey_number".parse::<AttributeKey>().unwrap(),
            AttributeKey::JerseyNumber
        );
        assert_eq!(
            " IS_ACTIVE ".parse::<AttributeKey>().unwrap(),
            AttributeKey::IsActive
        );
        assert_eq!(
            "shoe_size".parse::<AttributeKey>(),
            Err(ModelError::UnknownAttribute("shoe_size".to_string()))
        );
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(AttributeKey::Position.coercion(), Coercion::Position);
        assert_eq!(AttributeKey::JerseyNumber.coercion(), Coercion::JerseyNumber);
        assert_eq!(AttributeKey::IsActive.coercion(), Coercion::Active);
        assert_eq!(AttributeKey::BirthDate.coercion(), Coercion::Text);
    }

    #[test]
    fn target_attribute_drops_blank_synonyms() {
        let attr = TargetAttribute::new(AttributeKey::Email, ["  email ", "", "   ", "courriel"]);
        assert_eq!(attr.synonyms, vec!["email", "courriel"]);
        assert!(!attr.required);
        assert!(TargetAttribute::new(AttributeKey::LastName, ["nom"]).required);
    }

    #[test]
    fn attribute_key_serializes_snake_case() {
        let json = serde_json::to_string(&AttributeKey::EmergencyContact).unwrap();
        assert_eq!(json, "\"emergency_contact\"");
        let key: AttributeKey = serde_json::from_str("\"parent_email\"").unwrap();
        assert_eq!(key, AttributeKey::ParentEmail);
    }
}
