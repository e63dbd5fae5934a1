//! Repository of confirmed mappings.
//!
//! Clubs usually export rosters from the same registration system season
//! after season. Once a mapping has been confirmed it can be saved under a
//! name and reused, skipping auto-mapping for files with the same layout.
//!
//! # Storage Format
//!
//! One pretty-printed JSON file per mapping, named `{name}.json`.

use std::fs;
use std::path::{Path, PathBuf};

use rink_model::FieldMapping;
use serde::{Deserialize, Serialize};

use crate::engine::MappingResult;
use crate::error::RepositoryError;

const FORMAT_VERSION: &str = "1.0";

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

/// A confirmed mapping with repository metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMapping {
    pub name: String,
    pub mappings: Vec<FieldMapping>,
    /// RFC 3339 timestamp of when this mapping was saved.
    #[serde(default)]
    pub saved_at: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

impl SavedMapping {
    pub fn new(name: impl Into<String>, mappings: Vec<FieldMapping>) -> Self {
        Self {
            name: name.into(),
            mappings,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            version: default_version(),
        }
    }

    /// Applies this mapping to a new file's headers.
    ///
    /// Saved mappings whose column is absent are dropped; headers with no
    /// saved mapping are reported unmapped.
    pub fn apply_to(&self, headers: &[String]) -> MappingResult {
        MappingResult::from_mappings(headers, &self.mappings)
    }
}

/// Directory-backed store of [`SavedMapping`]s.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

impl MappingRepository {
    /// Opens a repository, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| RepositoryError::Io {
            path: base_dir.clone(),
            source: e,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes a mapping, replacing any mapping saved under the same name.
    pub fn save(&self, mapping: &SavedMapping) -> Result<PathBuf, RepositoryError> {
        let path = self.path_for(&mapping.name)?;
        let json = serde_json::to_string_pretty(mapping).map_err(|e| RepositoryError::Json {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, json).map_err(|e| RepositoryError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), mappings = mapping.mappings.len(), "saved mapping");
        Ok(path)
    }

    /// Loads a mapping by name. Returns `None` if none exists.
    pub fn load(&self, name: &str) -> Result<Option<SavedMapping>, RepositoryError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|e| RepositoryError::Io {
            path: path.clone(),
            source: e,
        })?;
        let mapping = serde_json::from_str(&contents).map_err(|e| RepositoryError::Json {
            path: path.clone(),
            source: e,
        })?;
        Ok(Some(mapping))
    }

    /// Lists saved mapping names, sorted.
    pub fn list(&self) -> Result<Vec<String>, RepositoryError> {
        let entries = fs::read_dir(&self.base_dir).map_err(|e| RepositoryError::Io {
            path: self.base_dir.clone(),
            source: e,
        })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RepositoryError::Io {
                path: self.base_dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Deletes a saved mapping. Returns true if it existed.
    pub fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| RepositoryError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(true)
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, RepositoryError> {
        let name = name.trim();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.base_dir.join(format!("{name}.json")))
    }
}
