//! Parsed CSV content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One data row, keyed by trimmed header.
pub type RawRow = BTreeMap<String, String>;

/// Output of the CSV parser.
///
/// Structural problems never abort parsing; they are collected in
/// `parse_errors` and callers decide whether to proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Column names in file order. Not necessarily unique.
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub parse_errors: Vec<String>,
}

impl ParsedTable {
    /// A table with no content and a single error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            parse_errors: vec![message.into()],
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.parse_errors.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
