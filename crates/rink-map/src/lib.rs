//! Roster column mapping.
//!
//! - [`FieldMapper`] infers which CSV column holds which player attribute
//!   from header names alone, scoring every inference.
//! - [`Materializer`] applies a confirmed mapping to parsed rows and
//!   produces typed [`PlayerRecord`](rink_model::PlayerRecord)s.
//! - [`MappingRepository`] stores confirmed mappings for reuse.

#![deny(unsafe_code)]

mod catalog;
mod config;
mod engine;
mod error;
mod materialize;
mod repository;
pub mod score;

pub use catalog::{TargetCatalog, default_synonyms};
pub use config::{ImportConfig, MaterializeSection};
pub use engine::{
    ConfidenceLevel, ConfidenceThresholds, DEFAULT_MIN_CONFIDENCE, FieldMapper, MappingResult,
};
pub use error::{ConfigError, MappingError, RepositoryError};
pub use materialize::{
    ActivePolicy, Materializer, coerce_jersey_number, coerce_position, is_truthy,
};
pub use repository::{MappingRepository, SavedMapping};

use rink_model::{FieldMapping, PlayerRecord, RawRow};

/// Auto-maps headers against the built-in catalog.
pub fn auto_map(headers: &[String]) -> MappingResult {
    FieldMapper::default().auto_map(headers)
}

/// Materializes rows with the default `is_active` policy.
pub fn materialize(rows: &[RawRow], mappings: &[FieldMapping]) -> Vec<PlayerRecord> {
    Materializer::default().materialize(rows, mappings)
}
