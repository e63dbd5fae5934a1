//! Column-to-attribute mapping types.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeKey;

/// Which matching tier produced a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Header equals a synonym, ignoring case.
    Exact,
    /// Header contains a synonym, or a synonym contains the header.
    Contains,
    /// Header is within edit distance of a synonym.
    Fuzzy,
    /// Confirmed or corrected by a user.
    Manual,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Contains => "contains",
            MatchKind::Fuzzy => "fuzzy",
            MatchKind::Manual => "manual",
        }
    }
}

/// A source column assigned to a target attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Header of the source column (trimmed).
    pub source_column: String,
    pub target_attribute: AttributeKey,
    /// Confidence score in `[0, 1]`.
    pub confidence: f32,
    pub match_kind: MatchKind,
}

impl FieldMapping {
    pub fn new(
        source_column: impl Into<String>,
        target_attribute: AttributeKey,
        confidence: f32,
        match_kind: MatchKind,
    ) -> Self {
        Self {
            source_column: source_column.into(),
            target_attribute,
            confidence: confidence.clamp(0.0, 1.0),
            match_kind,
        }
    }

    /// A user-confirmed mapping at full confidence.
    pub fn manual(source_column: impl Into<String>, target_attribute: AttributeKey) -> Self {
        Self::new(source_column, target_attribute, 1.0, MatchKind::Manual)
    }
}
