//! Mapping engine implementation.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rink_model::{AttributeKey, FieldMapping};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::TargetCatalog;
use crate::error::MappingError;
use crate::score::{AttributeScore, score_attribute};

/// Minimum confidence a column must exceed to be mapped.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Confidence level categories for mapping quality assessment.
///
/// - `High`: exact synonym matches and manual confirmations
/// - `Medium`: substring matches, worth a glance
/// - `Low`: fuzzy matches requiring manual confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Returns a human-readable description of the confidence level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Configurable thresholds for categorizing mapping confidence.
///
/// Scores below `low` are not categorized. With the defaults an exact match
/// (1.0) is high, a substring match (0.8) is medium and a fuzzy match
/// (at most 0.7) is low.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThresholds {
    pub high: f32,
    pub medium: f32,
    pub low: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: 0.75,
            low: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl ConfidenceThresholds {
    /// Categorizes a confidence score into a confidence level.
    ///
    /// Returns `None` if the score is below the low threshold.
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// Result of a mapping operation.
///
/// Derived from header names only. Each attribute appears in at most one
/// mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MappingResult {
    /// Matched columns in header order.
    pub mappings: Vec<FieldMapping>,
    /// Columns that could not be mapped above the confidence threshold.
    pub unmapped_columns: Vec<String>,
    /// Required attributes no column maps to, in catalog order.
    pub missing_required: Vec<AttributeKey>,
}

impl MappingResult {
    /// Builds a result from an explicit mapping list.
    ///
    /// Mappings whose column is not among `headers` are dropped, as are
    /// mappings for an attribute an earlier mapping already claims. Headers
    /// not covered become unmapped.
    pub fn from_mappings(headers: &[String], mappings: &[FieldMapping]) -> Self {
        let present: BTreeSet<&str> = headers.iter().map(|h| h.trim()).collect();
        let mut claimed = BTreeSet::new();
        let mut kept: Vec<FieldMapping> = Vec::new();
        for mapping in mappings {
            if !present.contains(mapping.source_column.as_str())
                || kept.iter().any(|m| m.source_column == mapping.source_column)
                || !claimed.insert(mapping.target_attribute)
            {
                continue;
            }
            kept.push(mapping.clone());
        }
        let mut covered: BTreeSet<&str> = kept.iter().map(|m| m.source_column.as_str()).collect();
        let mut unmapped = Vec::new();
        for header in headers {
            let header = header.trim();
            if !covered.remove(header) {
                unmapped.push(header.to_string());
            }
        }
        let mut result = Self {
            mappings: kept,
            unmapped_columns: unmapped,
            missing_required: Vec::new(),
        };
        result.refresh_missing_required();
        result
    }

    /// Returns the mapping that targets `key`, if any.
    pub fn mapping_for(&self, key: AttributeKey) -> Option<&FieldMapping> {
        self.mappings.iter().find(|m| m.target_attribute == key)
    }

    /// Returns the attribute a column is mapped to, if any.
    pub fn attribute_for(&self, column: &str) -> Option<AttributeKey> {
        self.mappings
            .iter()
            .find(|m| m.source_column == column)
            .map(|m| m.target_attribute)
    }

    /// True when every required attribute is mapped.
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }

    /// Maps `column` to `key` as a user-confirmed mapping.
    ///
    /// The column must already be part of this result, mapped or unmapped.
    /// A column previously mapped elsewhere is moved.
    pub fn assign(&mut self, column: &str, key: AttributeKey) -> Result<(), MappingError> {
        let column = column.trim();
        let is_mapped = self.mappings.iter().any(|m| m.source_column == column);
        let is_unmapped = self.unmapped_columns.iter().any(|c| c == column);
        if !is_mapped && !is_unmapped {
            return Err(MappingError::UnknownColumn(column.to_string()));
        }
        if let Some(holder) = self
            .mappings
            .iter()
            .find(|m| m.target_attribute == key && m.source_column != column)
        {
            return Err(MappingError::AttributeAlreadyMapped {
                attribute: key,
                column: holder.source_column.clone(),
            });
        }

        let manual = FieldMapping::manual(column, key);
        if let Some(existing) = self.mappings.iter_mut().find(|m| m.source_column == column) {
            *existing = manual;
        } else {
            if let Some(idx) = self.unmapped_columns.iter().position(|c| c == column) {
                self.unmapped_columns.remove(idx);
            }
            self.mappings.push(manual);
        }
        self.refresh_missing_required();
        Ok(())
    }

    /// Removes the mapping of `column`, returning it to the unmapped list.
    pub fn unassign(&mut self, column: &str) -> Result<(), MappingError> {
        let column = column.trim();
        if let Some(idx) = self.mappings.iter().position(|m| m.source_column == column) {
            let removed = self.mappings.remove(idx);
            self.unmapped_columns.push(removed.source_column);
            self.refresh_missing_required();
            return Ok(());
        }
        if self.unmapped_columns.iter().any(|c| c == column) {
            return Ok(());
        }
        Err(MappingError::UnknownColumn(column.to_string()))
    }

    fn refresh_missing_required(&mut self) {
        self.missing_required = AttributeKey::required()
            .filter(|key| self.mapping_for(*key).is_none())
            .collect();
    }

    /// Returns the count of mappings at each confidence level.
    #[must_use]
    pub fn count_by_level(&self) -> BTreeMap<ConfidenceLevel, usize> {
        self.count_by_level_with(&ConfidenceThresholds::default())
    }

    /// Returns the count of mappings at each confidence level using custom thresholds.
    #[must_use]
    pub fn count_by_level_with(
        &self,
        thresholds: &ConfidenceThresholds,
    ) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for mapping in &self.mappings {
            if let Some(level) = thresholds.categorize(mapping.confidence) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Returns the minimum confidence score among all mappings, if any.
    #[must_use]
    pub fn min_confidence(&self) -> Option<f32> {
        self.mappings
            .iter()
            .map(|m| m.confidence)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Returns the mean confidence score among all mappings, if any.
    #[must_use]
    pub fn mean_confidence(&self) -> Option<f32> {
        if self.mappings.is_empty() {
            return None;
        }
        let sum: f32 = self.mappings.iter().map(|m| m.confidence).sum();
        Some(sum / self.mappings.len() as f32)
    }
}

/// Engine for mapping CSV headers to player attributes.
///
/// Columns are scanned in header order. Each column takes the best-scoring
/// attribute not already claimed by an earlier column, so the mapping is
/// one-to-one and fully determined by the header list and the catalog.
///
/// # Example
///
/// ```ignore
/// use rink_map::{FieldMapper, TargetCatalog};
///
/// let mapper = FieldMapper::new(TargetCatalog::default());
/// let result = mapper.auto_map(&["Prénom".to_string(), "Nom".to_string()]);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct FieldMapper {
    catalog: TargetCatalog,
    min_confidence: f32,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(TargetCatalog::default())
    }
}

impl FieldMapper {
    pub fn new(catalog: TargetCatalog) -> Self {
        Self {
            catalog,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    /// Overrides the acceptance threshold. A column maps only when its best
    /// score is strictly above this value.
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn catalog(&self) -> &TargetCatalog {
        &self.catalog
    }

    /// Suggests a mapping for a list of header names.
    pub fn auto_map(&self, headers: &[String]) -> MappingResult {
        let mut claimed: BTreeSet<AttributeKey> = BTreeSet::new();
        let mut mappings = Vec::new();
        let mut unmapped = Vec::new();

        for header in headers {
            let column = header.trim();
            match self.best_match(column, &claimed) {
                Some((key, score)) => {
                    debug!(
                        column,
                        attribute = %key,
                        confidence = score.confidence,
                        kind = score.kind.as_str(),
                        "mapped column"
                    );
                    claimed.insert(key);
                    mappings.push(FieldMapping::new(column, key, score.confidence, score.kind));
                }
                None => {
                    debug!(column, "no attribute matched column");
                    unmapped.push(column.to_string());
                }
            }
        }

        let missing_required: Vec<AttributeKey> = self
            .catalog
            .attributes()
            .iter()
            .filter(|a| a.required && !claimed.contains(&a.key))
            .map(|a| a.key)
            .collect();

        info!(
            columns = headers.len(),
            mapped = mappings.len(),
            unmapped = unmapped.len(),
            missing_required = missing_required.len(),
            "auto-mapped csv headers"
        );

        MappingResult {
            mappings,
            unmapped_columns: unmapped,
            missing_required,
        }
    }

    fn best_match(
        &self,
        column: &str,
        claimed: &BTreeSet<AttributeKey>,
    ) -> Option<(AttributeKey, AttributeScore)> {
        let mut best: Option<(AttributeKey, AttributeScore)> = None;
        for attribute in self.catalog.attributes() {
            if claimed.contains(&attribute.key) {
                continue;
            }
            let Some(score) = score_attribute(column, attribute) else {
                continue;
            };
            if score.confidence <= self.min_confidence {
                continue;
            }
            let better = match &best {
                Some((_, current)) => score.confidence > current.confidence,
                None => true,
            };
            if better {
                best = Some((attribute.key, score));
            }
        }
        best
    }
}
