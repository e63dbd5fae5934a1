//! Import configuration file.
//!
//! ```toml
//! [materialize]
//! active_policy = "keep_default"
//!
//! [synonyms]
//! jersey_number = ["dossard"]
//!
//! [synonyms_replace]
//! phone = ["mobile", "cellulaire"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rink_model::AttributeKey;
use serde::{Deserialize, Serialize};

use crate::catalog::TargetCatalog;
use crate::error::ConfigError;
use crate::materialize::{ActivePolicy, Materializer};

/// Per-deployment import settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    pub materialize: MaterializeSection,
    /// Synonyms appended to the built-in list, keyed by attribute name.
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Synonym lists that replace the built-in list, keyed by attribute name.
    pub synonyms_replace: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterializeSection {
    pub active_policy: ActivePolicy,
}

impl ImportConfig {
    /// Loads a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Builds the catalog: built-in synonyms, then replacements, then
    /// additions.
    pub fn catalog(&self) -> Result<TargetCatalog, ConfigError> {
        let mut catalog = TargetCatalog::default();
        for (name, synonyms) in &self.synonyms_replace {
            catalog = catalog.replace_synonyms(parse_key(name)?, synonyms.iter().cloned());
        }
        for (name, synonyms) in &self.synonyms {
            catalog = catalog.extend_synonyms(parse_key(name)?, synonyms.iter().cloned());
        }
        Ok(catalog)
    }

    pub fn materializer(&self) -> Materializer {
        Materializer::new(self.materialize.active_policy)
    }
}

fn parse_key(name: &str) -> Result<AttributeKey, ConfigError> {
    name.parse().map_err(|_| ConfigError::UnknownAttribute {
        name: name.to_string(),
    })
}
