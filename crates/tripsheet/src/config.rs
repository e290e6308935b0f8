//! Configuration file support.
//!
//! Loads the store location and the sheet names from TOML:
//!
//! ```toml
//! [store]
//! path = "trip"
//!
//! [sheets]
//! events = "Itinerary"
//! expenses = "Ledger"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "tripsheet.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripConfig {
    /// Backing store location
    #[serde(default)]
    pub store: StoreConfig,

    /// Sheet name per table
    #[serde(default)]
    pub sheets: SheetNames,
}

/// Where the workbook lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory of CSV sheets
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("trip")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Sheet names of the five itinerary tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    pub events: String,
    pub landmarks: String,
    pub flights: String,
    pub packing: String,
    pub expenses: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            events: "events".into(),
            landmarks: "landmarks".into(),
            flights: "flights".into(),
            packing: "packing".into(),
            expenses: "expenses".into(),
        }
    }
}

impl TripConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `tripsheet.toml` from `dir` when present, defaults otherwise
    pub fn load_default(dir: &Path) -> Result<Self> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            return Self::from_file(&path);
        }
        Ok(Self::default())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = TripConfig::from_toml(
            r#"
            [sheets]
            events = "Itinerary"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.path, PathBuf::from("trip"));
        assert_eq!(config.sheets.events, "Itinerary");
        assert_eq!(config.sheets.packing, "packing");
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(TripConfig::from_toml("").unwrap(), TripConfig::default());
    }

    #[test]
    fn test_load_default_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(TripConfig::load_default(dir.path()).unwrap(), TripConfig::new());

        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[store]\npath = \"/srv/trip\"\n").unwrap();
        let config = TripConfig::load_default(dir.path()).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/srv/trip"));

        std::fs::write(&path, "[store\n").unwrap();
        assert!(matches!(TripConfig::from_file(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = TripConfig::default();
        config.sheets.expenses = "Ledger".into();
        let text = config.to_toml().unwrap();
        assert_eq!(TripConfig::from_toml(&text).unwrap(), config);
    }
}
