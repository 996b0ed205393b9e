//! Configuration loading.
//!
//! Resolution order:
//!
//! 1. An explicit path (`--config`), which must exist and parse
//! 2. `$XDG_CONFIG_HOME/clutch/config.toml`, if present
//! 3. Built-in defaults
//!
//! `CLUTCH_GENERATOR_URL` then overrides `generator.endpoint`.
//!
//! ```toml
//! [generator]
//! endpoint = "http://127.0.0.1:8787/clutch"
//! timeout_secs = 120
//! api_key_env = "CLUTCH_API_KEY"
//! streaming = false
//!
//! [intake]
//! min_sleep_hours = 7.0
//! focus_method = "50/10"
//! energy_level = 5
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ClutchError, Result, ResultExt},
    intake::IntakeDefaults,
    models::{EnergyLevel, FocusMethod, SleepHours},
};

/// Environment variable that overrides the generator endpoint.
pub const ENDPOINT_ENV: &str = "CLUTCH_GENERATOR_URL";

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/clutch";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClutchConfig {
    pub generator: GeneratorConfig,
    pub intake: IntakeConfig,
}

/// How to reach the plan generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Name of an environment variable holding a bearer token
    pub api_key_env: Option<String>,
    /// Read responses as a chunked stream ending in `[DONE]`
    pub streaming: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key_env: None,
            streaming: false,
        }
    }
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The bearer token, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns `ClutchError::Configuration` if `api_key_env` names a variable
    /// that is not set.
    pub fn api_key(&self) -> Result<Option<String>> {
        let Some(var) = &self.api_key_env else {
            return Ok(None);
        };
        std::env::var(var)
            .map(Some)
            .map_err(|_| ClutchError::Configuration {
                message: format!("generator API key not found; set the {var} environment variable"),
            })
    }
}

/// Preference defaults for a new intake wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub min_sleep_hours: f32,
    pub focus_method: String,
    pub energy_level: u8,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        let defaults = IntakeDefaults::default();
        Self {
            min_sleep_hours: defaults.min_sleep_hours.get(),
            focus_method: defaults.focus_method.as_str().to_string(),
            energy_level: defaults.energy_level.get(),
        }
    }
}

impl IntakeConfig {
    /// Convert to validated wizard defaults.
    pub fn defaults(&self) -> Result<IntakeDefaults> {
        Ok(IntakeDefaults {
            min_sleep_hours: SleepHours::new(self.min_sleep_hours)?,
            focus_method: self.focus_method.parse::<FocusMethod>()?,
            energy_level: EnergyLevel::new(self.energy_level)?,
        })
    }
}

impl ClutchConfig {
    /// Load configuration with the fallback chain described above.
    ///
    /// # Errors
    ///
    /// An explicit path that cannot be read or parsed is an error. So is a
    /// file that parses but fails [`validate`](Self::validate).
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) => Self::load_from_file(&path)?,
                None => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            debug!("{ENDPOINT_ENV} overrides generator endpoint");
            config.generator.endpoint = endpoint;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ClutchError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml(&content).with_context(path.display().to_string())?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.generator.endpoint.trim().is_empty() {
            return Err(ClutchError::Configuration {
                message: "generator.endpoint must not be empty".to_string(),
            });
        }
        if self.generator.timeout_secs == 0 {
            return Err(ClutchError::Configuration {
                message: "generator.timeout_secs must be greater than zero".to_string(),
            });
        }
        self.intake.defaults().map_err(|e| ClutchError::Configuration {
            message: format!("[intake] {e}"),
        })?;
        Ok(())
    }

    /// Validated wizard defaults from the `[intake]` section.
    pub fn intake_defaults(&self) -> Result<IntakeDefaults> {
        self.intake.defaults()
    }

    /// `$XDG_CONFIG_HOME/clutch/config.toml`, if it exists.
    fn default_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("clutch").find_config_file("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClutchConfig::default();
        assert_eq!(config.generator.endpoint, "http://127.0.0.1:8787/clutch");
        assert_eq!(config.generator.timeout(), Duration::from_secs(120));
        assert!(!config.generator.streaming);

        let defaults = config.intake_defaults().unwrap();
        assert_eq!(defaults.min_sleep_hours.get(), 7.0);
        assert_eq!(defaults.focus_method, FocusMethod::Standard50);
        assert_eq!(defaults.energy_level.get(), 5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClutchConfig::from_toml(
            r#"
            [generator]
            streaming = true

            [intake]
            focus_method = "90/15"
            "#,
        )
        .unwrap();
        assert!(config.generator.streaming);
        assert_eq!(config.generator.timeout_secs, 120);
        assert_eq!(config.intake.focus_method, "90/15");
        assert_eq!(config.intake.energy_level, 5);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[generator]\nendpoint = \"http://localhost:9999/plan\"\ntimeout_secs = 30"
        )
        .unwrap();

        let config = ClutchConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.generator.endpoint, "http://localhost:9999/plan");
        assert_eq!(config.generator.timeout_secs, 30);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = ClutchConfig::load(Some(Path::new("/nonexistent/clutch.toml"))).unwrap_err();
        assert!(matches!(err, ClutchError::FileSystem { .. }));
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[generator\nendpoint = 3").unwrap();
        let err = ClutchConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ClutchError::Configuration { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClutchConfig::default();
        config.generator.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ClutchConfig::default();
        config.intake.energy_level = 11;
        assert!(config.validate().is_err());

        let mut config = ClutchConfig::default();
        config.intake.focus_method = "45/15".to_string();
        assert!(config.validate().is_err());

        let mut config = ClutchConfig::default();
        config.generator.endpoint = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_key_variable() {
        let config = GeneratorConfig {
            api_key_env: Some("CLUTCH_TEST_UNSET_KEY_VARIABLE".to_string()),
            ..GeneratorConfig::default()
        };
        assert!(config.api_key().is_err());
        assert_eq!(GeneratorConfig::default().api_key().unwrap(), None);
    }
}
