//! Error types for mapping operations.

use std::path::PathBuf;

use rink_model::AttributeKey;
use thiserror::Error;

/// Errors from manual mapping corrections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Column is not part of the mapping result.
    #[error("Column not found: {0}")]
    UnknownColumn(String),

    /// Attribute is already claimed by another column.
    #[error("Attribute '{attribute}' already mapped from column '{column}'")]
    AttributeAlreadyMapped {
        attribute: AttributeKey,
        column: String,
    },
}

/// Errors from loading import configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown attribute '{name}' in synonym configuration")]
    UnknownAttribute { name: String },
}

/// Errors from the saved mapping repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to access mapping repository {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize mapping {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid mapping name: '{name}'")]
    InvalidName { name: String },
}
