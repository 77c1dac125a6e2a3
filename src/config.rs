//! Configuration for loading contracts.
//!
//! ## Example config file (contracts.toml):
//! ```toml
//! schema_dir = "data"
//! id_field = "id"
//! cache = true
//!
//! [id_fields]
//! Team = "team_id"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::compiler::DEFAULT_ID_FIELD;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for a set of contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// Directory holding one `<Contract>.json` schema per contract
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Identifier field for contracts without an override
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Whether to cache field lists and compiled rules
    #[serde(default = "default_true")]
    pub cache: bool,

    /// Per-contract identifier overrides
    #[serde(default)]
    pub id_fields: HashMap<String, String>,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            id_field: default_id_field(),
            cache: true,
            id_fields: HashMap::new(),
        }
    }
}

impl ContractsConfig {
    /// Parses configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&content)
    }

    /// The identifier field for the named contract.
    pub fn id_field_for(&self, contract: &str) -> &str {
        self.id_fields
            .get(contract)
            .map(String::as_str)
            .unwrap_or(&self.id_field)
    }
}
