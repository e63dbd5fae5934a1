//! Header-to-attribute confidence scoring.
//!
//! Scoring is tiered. An exact synonym match always beats a substring
//! match, and a substring match always beats an edit-distance match, whose
//! confidence is scaled down below the substring tier.

use rapidfuzz::distance::levenshtein;
use rink_model::{MatchKind, TargetAttribute};

/// Confidence of a case-insensitive exact synonym match.
pub const EXACT_CONFIDENCE: f32 = 1.0;
/// Confidence of a substring match in either direction.
pub const CONTAINS_CONFIDENCE: f32 = 0.8;
/// Similarity a fuzzy match must exceed to count at all.
pub const FUZZY_SIMILARITY_MIN: f64 = 0.7;
/// Factor applied to fuzzy similarity.
pub const FUZZY_WEIGHT: f64 = 0.7;

/// Confidence of one header against one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeScore {
    pub confidence: f32,
    pub kind: MatchKind,
}

/// Scores a header against every synonym of an attribute.
///
/// `header` must already be trimmed. Returns `None` when no tier matches,
/// which includes the empty header.
pub fn score_attribute(header: &str, attribute: &TargetAttribute) -> Option<AttributeScore> {
    let header = header.to_lowercase();
    if header.is_empty() {
        return None;
    }
    let synonyms: Vec<String> = attribute
        .synonyms
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if synonyms.iter().any(|s| *s == header) {
        return Some(AttributeScore {
            confidence: EXACT_CONFIDENCE,
            kind: MatchKind::Exact,
        });
    }

    if synonyms
        .iter()
        .any(|s| header.contains(s.as_str()) || s.contains(header.as_str()))
    {
        return Some(AttributeScore {
            confidence: CONTAINS_CONFIDENCE,
            kind: MatchKind::Contains,
        });
    }

    let best = synonyms
        .iter()
        .map(|s| similarity(&header, s))
        .fold(0.0_f64, f64::max);
    if best > FUZZY_SIMILARITY_MIN {
        return Some(AttributeScore {
            confidence: (best * FUZZY_WEIGHT) as f32,
            kind: MatchKind::Fuzzy,
        });
    }
    None
}

/// Normalized edit-distance similarity in `[0, 1]`.
///
/// `(max_len - distance) / max_len` over characters of the lowercased
/// strings. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein_distance(&a, &b);
    (max_len - distance) as f64 / max_len as f64
}

/// Character-level Levenshtein distance (unit cost insert, delete, substitute).
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rink_model::AttributeKey;

    fn attribute(synonyms: &[&str]) -> TargetAttribute {
        TargetAttribute::new(AttributeKey::JerseyNumber, synonyms.iter().copied())
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("numéro", "numero"), 1);
        assert_eq!(levenshtein_distance("same", "same"), 0);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert!((similarity("kitten", "sitting") - 4.0 / 7.0).abs() < 1e-9);
        assert_eq!(similarity("ABC", "abc"), 1.0);
    }

    #[test]
    fn test_exact_is_case_insensitive() {
        let score = score_attribute("JERSEY", &attribute(&["jersey"])).unwrap();
        assert_eq!(score.confidence, EXACT_CONFIDENCE);
        assert_eq!(score.kind, MatchKind::Exact);

        let score = score_attribute("NUMÉRO", &attribute(&["numéro"])).unwrap();
        assert_eq!(score.kind, MatchKind::Exact);
    }

    #[test]
    fn test_contains_either_direction() {
        let score = score_attribute("Jersey #", &attribute(&["jersey"])).unwrap();
        assert_eq!(score.confidence, CONTAINS_CONFIDENCE);
        assert_eq!(score.kind, MatchKind::Contains);

        let score = score_attribute("chan", &attribute(&["chandail"])).unwrap();
        assert_eq!(score.kind, MatchKind::Contains);
    }

    #[test]
    fn test_fuzzy_is_penalized_below_contains() {
        // One substitution over eight characters: similarity 0.875.
        let score = score_attribute("chandall", &attribute(&["chandail"])).unwrap();
        assert_eq!(score.kind, MatchKind::Fuzzy);
        assert!((score.confidence - 0.6125).abs() < 1e-6);
        assert!(score.confidence < CONTAINS_CONFIDENCE);
    }

    #[test]
    fn test_fuzzy_threshold_is_exclusive() {
        // "abcdefghij" vs "abcdefgxyz": distance 3 over 10, similarity exactly 0.7.
        assert_eq!(score_attribute("abcdefghij", &attribute(&["abcdefgxyz"])), None);
    }

    #[test]
    fn test_exact_wins_over_contains_across_synonyms() {
        let score = score_attribute("number", &attribute(&["jersey number", "number"])).unwrap();
        assert_eq!(score.kind, MatchKind::Exact);
    }

    #[test]
    fn test_empty_header_never_matches() {
        assert_eq!(score_attribute("", &attribute(&["jersey"])), None);
    }

    #[test]
    fn test_unrelated_header() {
        assert_eq!(score_attribute("Shoe size", &attribute(&["jersey"])), None);
    }
}
