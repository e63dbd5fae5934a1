//! Materialized player records and the draft used to assemble them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeKey, Position};

/// A typed player record ready for bulk insertion.
///
/// Names are always present (possibly empty); optional attributes are
/// present only when a usable value was found in the source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_notes: Option<String>,
    pub is_active: bool,
}

/// A coerced attribute value held by a [`PlayerDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValue {
    Text(String),
    Position(Position),
    JerseyNumber(u8),
    Active(bool),
}

/// Mutable accumulator for one row's attribute values.
///
/// Values are keyed by [`AttributeKey`]; setting a key twice keeps the last
/// value. [`PlayerDraft::build`] applies defaults and freezes the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDraft {
    values: BTreeMap<AttributeKey, DraftValue>,
}

impl PlayerDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: AttributeKey, value: DraftValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: AttributeKey) -> Option<&DraftValue> {
        self.values.get(&key)
    }

    pub fn is_set(&self, key: AttributeKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Produces the final record.
    ///
    /// Missing names become empty strings and `is_active` defaults to true.
    /// A value whose variant does not fit the attribute is ignored.
    pub fn build(mut self) -> PlayerRecord {
        let position = match self.values.remove(&AttributeKey::Position) {
            Some(DraftValue::Position(position)) => Some(position),
            _ => None,
        };
        let jersey_number = match self.values.remove(&AttributeKey::JerseyNumber) {
            Some(DraftValue::JerseyNumber(number)) => Some(number),
            _ => None,
        };
        let is_active = match self.values.remove(&AttributeKey::IsActive) {
            Some(DraftValue::Active(active)) => active,
            _ => true,
        };

        PlayerRecord {
            first_name: self.take_text(AttributeKey::FirstName).unwrap_or_default(),
            last_name: self.take_text(AttributeKey::LastName).unwrap_or_default(),
            email: self.take_text(AttributeKey::Email),
            phone: self.take_text(AttributeKey::Phone),
            birth_date: self.take_text(AttributeKey::BirthDate),
            position,
            jersey_number,
            parent_name: self.take_text(AttributeKey::ParentName),
            parent_phone: self.take_text(AttributeKey::ParentPhone),
            parent_email: self.take_text(AttributeKey::ParentEmail),
            emergency_contact: self.take_text(AttributeKey::EmergencyContact),
            medical_notes: self.take_text(AttributeKey::MedicalNotes),
            is_active,
        }
    }

    fn take_text(&mut self, key: AttributeKey) -> Option<String> {
        match self.values.remove(&key) {
            Some(DraftValue::Text(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}
