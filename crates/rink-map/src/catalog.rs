//! Synonym catalog of target attributes.
//!
//! The catalog is plain data handed to the [`FieldMapper`](crate::FieldMapper).
//! [`TargetCatalog::default`] carries the built-in English and French header
//! spellings; deployments extend or replace them through
//! [`ImportConfig`](crate::ImportConfig).

use rink_model::{AttributeKey, TargetAttribute};
use serde::Serialize;

/// Ordered set of target attributes with their synonyms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetCatalog {
    attributes: Vec<TargetAttribute>,
}

impl TargetCatalog {
    /// Builds a catalog from explicit entries.
    ///
    /// Entries are kept in catalog order; when a key appears twice the
    /// later entry replaces the earlier one.
    pub fn new(attributes: impl IntoIterator<Item = TargetAttribute>) -> Self {
        let mut entries: Vec<TargetAttribute> = Vec::new();
        for attribute in attributes {
            if let Some(existing) = entries.iter_mut().find(|a| a.key == attribute.key) {
                *existing = attribute;
            } else {
                entries.push(attribute);
            }
        }
        entries.sort_by_key(|a| a.key);
        Self {
            attributes: entries,
        }
    }

    /// Attributes in catalog order.
    pub fn attributes(&self) -> &[TargetAttribute] {
        &self.attributes
    }

    pub fn get(&self, key: AttributeKey) -> Option<&TargetAttribute> {
        self.attributes.iter().find(|a| a.key == key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Appends synonyms to an attribute, skipping ones already present
    /// (compared case-insensitively).
    #[must_use]
    pub fn extend_synonyms<I, S>(mut self, key: AttributeKey, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added = TargetAttribute::new(key, synonyms);
        match self.attributes.iter_mut().find(|a| a.key == key) {
            Some(existing) => {
                for synonym in added.synonyms {
                    if !existing
                        .synonyms
                        .iter()
                        .any(|s| s.to_lowercase() == synonym.to_lowercase())
                    {
                        existing.synonyms.push(synonym);
                    }
                }
            }
            None => {
                self.attributes.push(added);
                self.attributes.sort_by_key(|a| a.key);
            }
        }
        self
    }

    /// Replaces the synonym list of an attribute.
    #[must_use]
    pub fn replace_synonyms<I, S>(mut self, key: AttributeKey, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replacement = TargetAttribute::new(key, synonyms);
        match self.attributes.iter_mut().find(|a| a.key == key) {
            Some(existing) => *existing = replacement,
            None => {
                self.attributes.push(replacement);
                self.attributes.sort_by_key(|a| a.key);
            }
        }
        self
    }
}

impl Default for TargetCatalog {
    fn default() -> Self {
        Self::new(
            AttributeKey::ALL
                .into_iter()
                .map(|key| TargetAttribute::new(key, default_synonyms(key).iter().copied())),
        )
    }
}

/// Built-in header spellings for each attribute.
///
/// The canonical key is always the first synonym. Very short spellings are
/// avoided because substring matching would let them claim unrelated
/// headers.
pub fn default_synonyms(key: AttributeKey) -> &'static [&'static str] {
    match key {
        AttributeKey::FirstName => &[
            "first_name",
            "first name",
            "firstname",
            "given name",
            "prénom",
            "prenom",
        ],
        AttributeKey::LastName => &[
            "last_name",
            "last name",
            "lastname",
            "surname",
            "family name",
            "nom",
            "nom de famille",
        ],
        AttributeKey::Email => &["email", "e-mail", "mail", "courriel", "adresse courriel"],
        AttributeKey::Phone => &[
            "phone",
            "phone number",
            "telephone",
            "téléphone",
            "cell",
            "cellulaire",
        ],
        AttributeKey::BirthDate => &[
            "birth_date",
            "birth date",
            "birthdate",
            "date of birth",
            "dob",
            "date de naissance",
            "naissance",
        ],
        AttributeKey::Position => &["position", "pos", "poste"],
        AttributeKey::JerseyNumber => &[
            "jersey_number",
            "jersey number",
            "jersey",
            "number",
            "numéro",
            "numero",
            "numéro de chandail",
            "chandail",
        ],
        AttributeKey::ParentName => &[
            "parent_name",
            "parent name",
            "parent",
            "guardian",
            "nom du parent",
            "nom parent",
            "tuteur",
        ],
        AttributeKey::ParentPhone => &[
            "parent_phone",
            "parent phone",
            "guardian phone",
            "téléphone parent",
            "téléphone du parent",
            "telephone parent",
        ],
        AttributeKey::ParentEmail => &[
            "parent_email",
            "parent email",
            "guardian email",
            "courriel parent",
            "courriel du parent",
        ],
        AttributeKey::EmergencyContact => &[
            "emergency_contact",
            "emergency contact",
            "emergency",
            "contact d'urgence",
            "urgence",
        ],
        AttributeKey::MedicalNotes => &[
            "medical_notes",
            "medical notes",
            "medical",
            "allergies",
            "notes médicales",
            "notes medicales",
        ],
        AttributeKey::IsActive => &["is_active", "active", "actif", "status", "statut"],
    }
}
