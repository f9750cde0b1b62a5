//! Crate configuration.
//!
//! A single serializable struct supplies process-wide defaults, most
//! importantly the cell resolution used when a grid is created without an
//! explicit one. The configuration never affects already-serialized files:
//! resolution is always read back from the file header.

use crate::error::{GridError, Result};
use once_cell::sync::OnceCell;
use serde::de::Error;
use serde::{Deserialize, Serialize};

static GLOBAL: OnceCell<Config> = OnceCell::new();

/// Process-wide cache configuration.
///
/// Designed to be loadable from JSON (or TOML with the `toml` feature)
/// while keeping complexity minimal.
///
/// # Example
///
/// ```rust
/// use gridcache::Config;
///
/// let config = Config::default();
/// assert_eq!(config.default_resolution, 4);
///
/// let config = Config::from_json(r#"{"default_resolution": 10}"#).unwrap();
/// assert_eq!(config.default_resolution, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Cell edge length in world units used for newly created grids.
    #[serde(default = "Config::default_resolution_value")]
    pub default_resolution: u8,
}

impl Config {
    const fn default_resolution_value() -> u8 {
        4
    }

    pub fn with_default_resolution(mut self, resolution: u8) -> Self {
        self.default_resolution = resolution;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.default_resolution == 0 {
            return Err(GridError::InvalidInput(
                "default resolution must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Install this configuration as the process-wide default.
    ///
    /// Fails if a configuration was already installed; the global value is
    /// write-once for the life of the process.
    pub fn install(self) -> Result<()> {
        self.validate()?;
        GLOBAL
            .set(self)
            .map_err(|_| GridError::InvalidInput("configuration already installed".to_string()))
    }

    /// The installed process-wide configuration, or the built-in defaults
    /// if none was installed.
    pub fn global() -> &'static Config {
        GLOBAL.get_or_init(Config::default)
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as a JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from a TOML string (requires the `toml` feature).
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e.to_string()));
        }
        Ok(config)
    }

    /// Save configuration as a TOML string (requires the `toml` feature).
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_resolution: Self::default_resolution_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_resolution, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_zero_resolution_rejected() {
        let config = Config::default().with_default_resolution(0);
        assert!(config.validate().is_err());
        assert!(Config::from_json(r#"{"default_resolution": 0}"#).is_err());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = Config::default().with_default_resolution(10);
        let json = config.to_json().unwrap();
        let deserialized = Config::from_json(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_missing_field_uses_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.default_resolution, 4);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config::default().with_default_resolution(8);
        let toml_str = config.to_toml().unwrap();
        let deserialized = Config::from_toml(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }
}
