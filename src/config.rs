use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::utils::MediatorError;

/// Immutable configuration handed to the mediator at construction.
///
/// The whole map is the configuration for the mediator's entire lifetime;
/// there is no mutation API and no reload. Callers holding the map via
/// [`Config::values`] must treat it as read-only.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: HashMap<String, Value>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    /// Builder-style insertion for wiring code and tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let table: toml::Table = toml::from_str(&contents).context("Failed to parse config file")?;

        let mut values = HashMap::new();
        for (key, value) in table {
            let value = serde_json::to_value(value).context("Failed to convert config value")?;
            values.insert(key, value);
        }

        info!("Config loaded with {} entries", values.len());
        Ok(Self { values })
    }

    /// Load the configuration from the default location, or start empty
    /// when no file exists there.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            info!("No config file found, using defaults");
            Ok(Self::new())
        }
    }

    /// Default config file location for the current platform.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// The full configuration map.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Look up a single key, failing fast when it is absent.
    ///
    /// Defined-but-falsy values (zero, empty string, false, null) are
    /// returned like any other value; only a truly absent key is an error.
    pub fn param(&self, name: &str) -> Result<&Value, MediatorError> {
        self.values
            .get(name)
            .ok_or_else(|| MediatorError::MissingConfigKey(name.to_string()))
    }
}
