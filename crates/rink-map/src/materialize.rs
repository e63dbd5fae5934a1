//! Conversion of parsed rows into player records.

use rink_model::{
    AttributeKey, Coercion, DraftValue, FieldMapping, PlayerDraft, PlayerRecord, Position, RawRow,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const TRUTHY: &[&str] = &["true", "1", "yes", "oui", "actif", "active"];
const FORWARD: &[&str] = &["forward", "attaquant", "f"];
const DEFENSE: &[&str] = &["defense", "défenseur", "defenseur", "d"];
const GOALIE: &[&str] = &["goalie", "gardien", "g"];

/// Treatment of an `is_active` value that is present but not a known
/// truthy spelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePolicy {
    /// The player is imported as inactive.
    #[default]
    Inactive,
    /// The value is ignored and the player keeps the active default.
    KeepDefault,
}

/// Applies a confirmed mapping to parsed rows.
///
/// Materialization never fails. A value that cannot be coerced is dropped
/// for that field only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Materializer {
    active_policy: ActivePolicy,
}

impl Materializer {
    pub fn new(active_policy: ActivePolicy) -> Self {
        Self { active_policy }
    }

    pub fn active_policy(&self) -> ActivePolicy {
        self.active_policy
    }

    /// Produces one record per row, in row order.
    pub fn materialize(&self, rows: &[RawRow], mappings: &[FieldMapping]) -> Vec<PlayerRecord> {
        let records: Vec<PlayerRecord> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.materialize_row(idx, row, mappings))
            .collect();
        info!(
            rows = rows.len(),
            mappings = mappings.len(),
            "materialized player records"
        );
        records
    }

    fn materialize_row(&self, idx: usize, row: &RawRow, mappings: &[FieldMapping]) -> PlayerRecord {
        let mut draft = PlayerDraft::new();
        for mapping in mappings {
            let Some(raw) = row.get(&mapping.source_column) else {
                continue;
            };
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let key = mapping.target_attribute;
            match self.coerce(key, raw) {
                Some(value) => draft.set(key, value),
                // Row values are player data; only the location is logged.
                None => debug!(row = idx + 1, attribute = %key, "dropped value that failed coercion"),
            }
        }
        draft.build()
    }

    /// Coerces a non-empty trimmed value for `key`.
    pub fn coerce(&self, key: AttributeKey, raw: &str) -> Option<DraftValue> {
        match key.coercion() {
            Coercion::Text => Some(DraftValue::Text(raw.to_string())),
            Coercion::Position => coerce_position(raw).map(DraftValue::Position),
            Coercion::JerseyNumber => coerce_jersey_number(raw).map(DraftValue::JerseyNumber),
            Coercion::Active => {
                if is_truthy(raw) {
                    Some(DraftValue::Active(true))
                } else {
                    match self.active_policy {
                        ActivePolicy::Inactive => Some(DraftValue::Active(false)),
                        ActivePolicy::KeepDefault => None,
                    }
                }
            }
        }
    }
}

/// Recognizes English and French position spellings.
pub fn coerce_position(raw: &str) -> Option<Position> {
    let value = raw.trim().to_lowercase();
    let value = value.as_str();
    if FORWARD.contains(&value) {
        Some(Position::Forward)
    } else if DEFENSE.contains(&value) {
        Some(Position::Defense)
    } else if GOALIE.contains(&value) {
        Some(Position::Goalie)
    } else {
        None
    }
}

/// Accepts integral numbers from 0 to 99.
pub fn coerce_jersey_number(raw: &str) -> Option<u8> {
    let number: f64 = raw.trim().parse().ok()?;
    if !number.is_finite() || number.fract() != 0.0 || !(0.0..=99.0).contains(&number) {
        return None;
    }
    Some(number as u8)
}

/// True for the accepted truthy spellings, ignoring case.
pub fn is_truthy(raw: &str) -> bool {
    let value = raw.trim().to_lowercase();
    TRUTHY.contains(&value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_positions() {
        assert_eq!(coerce_position("Forward"), Some(Position::Forward));
        assert_eq!(coerce_position("ATTAQUANT"), Some(Position::Forward));
        assert_eq!(coerce_position("f"), Some(Position::Forward));
        assert_eq!(coerce_position("Défenseur"), Some(Position::Defense));
        assert_eq!(coerce_position("defenseur"), Some(Position::Defense));
        assert_eq!(coerce_position("D"), Some(Position::Defense));
        assert_eq!(coerce_position("Gardien"), Some(Position::Goalie));
        assert_eq!(coerce_position("g"), Some(Position::Goalie));
        assert_eq!(coerce_position("centre"), None);
    }

    #[test]
    fn test_jersey_numbers() {
        assert_eq!(coerce_jersey_number("5"), Some(5));
        assert_eq!(coerce_jersey_number("0"), Some(0));
        assert_eq!(coerce_jersey_number("99"), Some(99));
        assert_eq!(coerce_jersey_number("12.0"), Some(12));
        assert_eq!(coerce_jersey_number("100"), None);
        assert_eq!(coerce_jersey_number("150"), None);
        assert_eq!(coerce_jersey_number("-1"), None);
        assert_eq!(coerce_jersey_number("7.5"), None);
        assert_eq!(coerce_jersey_number("abc"), None);
        assert_eq!(coerce_jersey_number("NaN"), None);
        assert_eq!(coerce_jersey_number("inf"), None);
        assert_eq!(coerce_jersey_number(""), None);
    }

    #[test]
    fn test_truthy() {
        for value in ["true", "TRUE", "1", "Yes", "oui", "Actif", "active"] {
            assert!(is_truthy(value), "{value} should be truthy");
        }
        for value in ["false", "0", "non", "inactive", "2"] {
            assert!(!is_truthy(value), "{value} should not be truthy");
        }
    }

    #[test]
    fn test_active_policy() {
        let mappings = vec![FieldMapping::manual("Statut", AttributeKey::IsActive)];
        let rows = vec![row(&[("Statut", "non")]), row(&[("Statut", "oui")]), row(&[])];

        let records = Materializer::new(ActivePolicy::Inactive).materialize(&rows, &mappings);
        let active: Vec<bool> = records.iter().map(|r| r.is_active).collect();
        assert_eq!(active, vec![false, true, true]);

        let records = Materializer::new(ActivePolicy::KeepDefault).materialize(&rows, &mappings);
        let active: Vec<bool> = records.iter().map(|r| r.is_active).collect();
        assert_eq!(active, vec![true, true, true]);
    }

    #[test]
    fn test_blank_values_leave_attribute_unset() {
        let mappings = vec![
            FieldMapping::manual("Nom", AttributeKey::LastName),
            FieldMapping::manual("Courriel", AttributeKey::Email),
            FieldMapping::manual("Actif", AttributeKey::IsActive),
        ];
        let rows = vec![row(&[("Nom", "   "), ("Courriel", ""), ("Actif", " ")])];
        let record = &Materializer::default().materialize(&rows, &mappings)[0];
        assert_eq!(record.last_name, "");
        assert_eq!(record.email, None);
        assert!(record.is_active);
    }

    #[test]
    fn test_missing_column_is_skipped() {
        let mappings = vec![FieldMapping::manual("Poste", AttributeKey::Position)];
        let rows = vec![row(&[("Autre", "g")])];
        let record = &Materializer::default().materialize(&rows, &mappings)[0];
        assert_eq!(record.position, None);
    }

    #[test]
    fn test_text_passes_through_trimmed() {
        let mappings = vec![FieldMapping::manual("Naissance", AttributeKey::BirthDate)];
        let rows = vec![row(&[("Naissance", " 2012-03-04 ")])];
        let record = &Materializer::default().materialize(&rows, &mappings)[0];
        assert_eq!(record.birth_date.as_deref(), Some("2012-03-04"));
    }
}
