//! Configuration file handling.
//!
//! This module provides loading and saving of patchcat configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/patchcat/config.toml`
//! - macOS: `~/Library/Application Support/patchcat/config.toml`
//! - Windows: `%APPDATA%\patchcat\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! catalog_url = "https://downloads.esri.com/patch_notification/patches.json"
//! timeout_secs = 30
//! default_format = "text"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::{DEFAULT_CATALOG_URL, DEFAULT_TIMEOUT_SECS};

/// Application configuration.
///
/// All fields are optional in the file; missing entries fall back to the
/// defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog URL to fetch.
    ///
    /// Default: the vendor's published patch feed
    pub catalog_url: String,

    /// Fetch timeout, in seconds.
    ///
    /// Default: 30
    pub timeout_secs: u64,

    /// Default output format when no `--format` flag is provided.
    ///
    /// Valid values: "text", "json"
    /// Default: "text"
    pub default_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path; missing files yield
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("patchcat")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.default_format, "text");
    }

    #[test]
    fn test_load_from_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "catalog_url = \"https://example.com/patches.json\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.catalog_url, "https://example.com/patches.json");
        assert_eq!(config.timeout_secs, 5);
        // Unspecified fields keep their defaults.
        assert_eq!(config.default_format, "text");
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"not a number\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
