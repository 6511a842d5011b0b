//! Configuration file
//!
//! ```json
//! {
//!   "search_root": ".",
//!   "timestamp_format": "%Y-%m-%d %H:%M:%S%.6f",
//!   "fsync": true,
//!   "log_level": "warn"
//! }
//! ```
//!
//! Every field is optional. Without `--config` the defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::store::{is_valid_timestamp_format, DEFAULT_TIMESTAMP_FORMAT};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory `find` searches when no `--root` is given
    #[serde(default = "default_search_root")]
    pub search_root: PathBuf,

    /// chrono format for the "Created at" preamble
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// fsync after every write (default true)
    #[serde(default = "default_fsync")]
    pub fsync: bool,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_search_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}
fn default_fsync() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_root: default_search_root(),
            timestamp_format: default_timestamp_format(),
            fsync: default_fsync(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if !is_valid_timestamp_format(&self.timestamp_format) {
            return Err(CliError::config_error(format!(
                "Invalid timestamp_format: '{}'",
                self.timestamp_format
            )));
        }

        self.severity()?;

        if self.search_root.as_os_str().is_empty() {
            return Err(CliError::config_error("search_root must not be empty"));
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(|e| {
            CliError::config_error(format!("Invalid log_level: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search_root, PathBuf::from("."));
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
        assert!(config.fsync);
        assert_eq!(config.severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert!(config.fsync);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_json(r#"{"fsync": false, "log_level": "trace"}"#).unwrap();
        assert!(!config.fsync);
        assert_eq!(config.severity().unwrap(), Severity::Trace);
        assert_eq!(config.search_root, PathBuf::from("."));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Config::from_json(r#"{"log_level": "chatty"}"#).is_err());
        assert!(Config::from_json(r#"{"timestamp_format": "%Q"}"#).is_err());
        assert!(Config::from_json(r#"{"search_root": ""}"#).is_err());
        assert!(Config::from_json(r#"{"unknown": 1}"#).is_err());
        assert!(Config::from_json("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("filekeep.json");
        fs::write(&path, r#"{"search_root": "/srv/docs"}"#).unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.search_root, PathBuf::from("/srv/docs"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(&temp.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code_str(), "FILEKEEP_CLI_CONFIG_ERROR");
    }
}
