//! Loading contracts from schema files.
//!
//! Every `*.json` file in a directory becomes a contract named after the
//! file stem (`Person.json` → `Person`). Filesystem access goes through the
//! [`FileSystem`] trait so loading can be tested without touching disk.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{ConfigError, ContractsConfig};
use crate::contract::Contract;
use crate::error::ContractError;
use crate::registry::ContractRegistry;

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// The error type for filesystem operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the contents of a file as a string.
    fn read_file(&self, path: &Path) -> Result<String, Self::Error>;

    /// Lists all entries in a directory.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, Self::Error>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    type Error = std::io::Error;

    fn read_file(&self, path: &Path) -> Result<String, Self::Error> {
        std::fs::read_to_string(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, Self::Error> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();
        Ok(entries)
    }
}

/// Errors that can occur while loading contracts.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error reading a file or directory
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error
    #[error("Parse error in {0}: {1}")]
    Parse(PathBuf, serde_json::Error),

    /// File name that cannot serve as a contract name
    #[error("Invalid filename: {0}")]
    InvalidFileName(PathBuf),

    /// Contract construction or registration error
    #[error("Contract error in {0}: {1}")]
    Contract(PathBuf, ContractError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Multiple errors occurred
    #[error("Multiple errors: {0:?}")]
    Multiple(Vec<LoadError>),
}

impl ContractRegistry {
    /// Registers every `*.json` schema in `dir` as a contract.
    ///
    /// Identifier fields come from `config`. Files that fail to load are
    /// skipped and reported together in [`LoadError::Multiple`]; every other
    /// file is still registered. Returns the number of contracts loaded.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use data_contracts::{ContractRegistry, ContractsConfig, LocalFileSystem};
    ///
    /// let config = ContractsConfig::load("contracts.toml")?;
    /// let registry = ContractRegistry::from_config(&config);
    /// registry.load_dir(&config.schema_dir, &LocalFileSystem, &config)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_dir<Fs: FileSystem>(
        &self,
        dir: impl AsRef<Path>,
        fs: &Fs,
        config: &ContractsConfig,
    ) -> Result<usize, LoadError> {
        let dir = dir.as_ref();
        let files = fs
            .read_dir(dir)
            .map_err(|e| LoadError::Io(dir.to_path_buf(), Box::new(e)))?;

        let mut loaded = 0;
        let mut errors = Vec::new();

        for file in files {
            if file.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match self.load_contract_file(&file, fs, config) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "skipping contract");
                    errors.push(e);
                }
            }
        }

        debug!(dir = %dir.display(), loaded, failed = errors.len(), "loaded contracts");

        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(LoadError::Multiple(errors))
        }
    }

    fn load_contract_file<Fs: FileSystem>(
        &self,
        path: &Path,
        fs: &Fs,
        config: &ContractsConfig,
    ) -> Result<(), LoadError> {
        let content = fs
            .read_file(path)
            .map_err(|e| LoadError::Io(path.to_path_buf(), Box::new(e)))?;

        let json: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| LoadError::Parse(path.to_path_buf(), e))?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LoadError::InvalidFileName(path.to_path_buf()))?;

        let contract = Contract::from_value(name, &json)
            .map_err(|e| LoadError::Contract(path.to_path_buf(), e))?
            .with_id_field(config.id_field_for(name));

        self.register(contract)
            .map_err(|e| LoadError::Contract(path.to_path_buf(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug)]
    struct MockFileSystemError(String);

    impl std::fmt::Display for MockFileSystemError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl std::error::Error for MockFileSystemError {}

    struct MockFileSystem {
        files: BTreeMap<PathBuf, String>,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                files: BTreeMap::new(),
            }
        }

        fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
            self.files.insert(path.into(), content.into());
        }
    }

    impl FileSystem for MockFileSystem {
        type Error = MockFileSystemError;

        fn read_file(&self, path: &Path) -> Result<String, Self::Error> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| MockFileSystemError(format!("File not found: {}", path.display())))
        }

        fn read_dir(&self, _path: &Path) -> Result<Vec<PathBuf>, Self::Error> {
            Ok(self.files.keys().cloned().collect())
        }
    }

    #[test]
    fn test_load_contracts() {
        let mut fs = MockFileSystem::new();
        fs.add_file(
            "Person.json",
            r#"{"properties": {"id": {"type": "integer"}, "name": {"type": "string"}}}"#,
        );
        fs.add_file("Team.json", r#"{"properties": {"team_id": {"type": "integer"}}}"#);
        fs.add_file("README.md", "not a schema");

        let mut config = ContractsConfig::default();
        config
            .id_fields
            .insert("Team".to_string(), "team_id".to_string());

        let registry = ContractRegistry::new();
        let loaded = registry.load_dir(".", &fs, &config).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(registry.names(), vec!["Person", "Team"]);
        assert_eq!(registry.get("Team").unwrap().id_field(), "team_id");
        assert_eq!(registry.describe("Person").unwrap(), vec!["name"]);
    }

    #[test]
    fn test_error_accumulation() {
        let mut fs = MockFileSystem::new();
        fs.add_file("Valid.json", r#"{"properties": {}}"#);
        fs.add_file("Invalid.json", "not valid json");
        fs.add_file("Scalar.json", "42");

        let registry = ContractRegistry::new();
        let result = registry.load_dir(".", &fs, &ContractsConfig::default());

        match result {
            Err(LoadError::Multiple(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| matches!(e, LoadError::Parse(..))));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, LoadError::Contract(_, ContractError::NoSchema(_)))));
            }
            other => panic!("Expected accumulated errors, got {:?}", other),
        }

        assert!(registry.get("Valid").is_some());
    }

    #[test]
    fn test_duplicate_load_is_reported() {
        let mut fs = MockFileSystem::new();
        fs.add_file("Person.json", r#"{"properties": {}}"#);

        let registry = ContractRegistry::new();
        let config = ContractsConfig::default();
        registry.load_dir(".", &fs, &config).unwrap();

        let err = registry.load_dir(".", &fs, &config).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Multiple(ref errors)
                if matches!(errors[0], LoadError::Contract(_, ContractError::DuplicateName(_)))
        ));
    }
}
