//! Pedal config file format and operations.

use duostomp_pedal::Settings;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::validate_settings;

/// Named set of tuning constants stored as TOML.
///
/// Every settings group and every key inside it is optional; anything left
/// out keeps the stock value.
///
/// # TOML Format
///
/// ```toml
/// name = "Dark room"
/// description = "Slower sweep, narrower pitch steps"
///
/// [settings.controls]
/// sensitivity = 12
///
/// [settings.modulation]
/// rate = { min = 0.05, max = 2.0 }
///
/// [settings.pitch]
/// deviations = [1.25, 1.5, 2.0, 3.0]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PedalConfig {
    /// Name of the config.
    #[serde(default = "default_name")]
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tuning constants.
    #[serde(default)]
    pub settings: Settings,
}

fn default_name() -> String {
    "Stock".to_string()
}

impl PedalConfig {
    /// Create a config holding the stock settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            settings: Settings::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a config from a file and reject invalid settings.
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the config to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the settings against every structural and unit-range rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_settings(&self.settings)?;
        Ok(())
    }
}

impl Default for PedalConfig {
    fn default() -> Self {
        Self::new(default_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duostomp_core::ValueRange;

    #[test]
    fn test_new_uses_stock_settings() {
        let config = PedalConfig::new("Test");
        assert_eq!(config.name, "Test");
        assert!(config.description.is_none());
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_empty_toml_is_stock() {
        let config = PedalConfig::from_toml("").unwrap();
        assert_eq!(config, PedalConfig::default());
    }

    #[test]
    fn test_partial_group_keeps_other_keys() {
        let config = PedalConfig::from_toml(
            r#"
name = "Twitchy"

[settings.controls]
sensitivity = 8
"#,
        )
        .unwrap();
        assert_eq!(config.name, "Twitchy");
        assert_eq!(config.settings.controls.sensitivity, 8);
        assert_eq!(config.settings.controls.adc_max, 1023);
        assert_eq!(config.settings.controls.debounce_ms, 5);
        assert_eq!(config.settings.filters, Settings::default().filters);
    }

    #[test]
    fn test_inline_range_and_array() {
        let config = PedalConfig::from_toml(
            r#"
[settings.modulation]
rate = { min = 0.05, max = 2.0 }

[settings.pitch]
deviations = [1.25, 1.5, 2.0, 3.0]
"#,
        )
        .unwrap();
        assert_eq!(config.settings.modulation.rate, ValueRange::new(0.05, 2.0));
        assert_eq!(config.settings.modulation.depth, ValueRange::new(0.01, 5.0));
        assert_eq!(config.settings.pitch.deviations, [1.25, 1.5, 2.0, 3.0]);
        assert_eq!(config.settings.pitch.grain_ms, 290.0);
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = PedalConfig::new("Round").with_description("trip");
        config.settings.ambience.damping = 0.25;
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("name = \"Round\""));
        assert_eq!(PedalConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_description_omitted_when_none() {
        let toml_str = PedalConfig::new("Bare").to_toml().unwrap();
        assert!(!toml_str.contains("description"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = PedalConfig::from_toml("settings = 3").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_validate_wraps_error() {
        let mut config = PedalConfig::default();
        config.settings.controls.sensitivity = 5000;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
