//! Domain types for the roster CSV import.
//!
//! This crate holds the shapes shared by the parser, the field mapper and
//! the record materializer. It performs no I/O.

#![deny(unsafe_code)]

pub mod attribute;
pub mod error;
pub mod mapping;
pub mod record;
pub mod table;

pub use attribute::{AttributeKey, Coercion, Position, TargetAttribute};
pub use error::{ModelError, Result};
pub use mapping::{FieldMapping, MatchKind};
pub use record::{DraftValue, PlayerDraft, PlayerRecord};
pub use table::{ParsedTable, RawRow};
