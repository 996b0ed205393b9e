//! Builder for creating and configuring ReplanController instances.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use super::ReplanController;
use crate::{
    config::ClutchConfig,
    error::Result,
    generator::{HttpPlanGenerator, PlanGenerator},
};

/// Builder for creating and configuring ReplanController instances.
#[derive(Clone, Default)]
pub struct SessionBuilder {
    config: Option<ClutchConfig>,
    config_path: Option<PathBuf>,
    generator: Option<Arc<dyn PlanGenerator>>,
}

impl SessionBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an already loaded configuration. Takes precedence over
    /// [`with_config_path`](Self::with_config_path).
    pub fn with_config(mut self, config: ClutchConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets a custom configuration file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_CONFIG_HOME/clutch/config.toml` or `~/.config/clutch/config.toml`,
    /// falling back to built-in defaults when neither exists.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses the given generator instead of one built from configuration.
    pub fn with_generator(mut self, generator: Arc<dyn PlanGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Builds the configured controller.
    ///
    /// # Errors
    ///
    /// Returns `ClutchError::FileSystem` or `ClutchError::Configuration` if
    /// the configuration cannot be loaded, and `ClutchError::Configuration`
    /// if the HTTP generator cannot be created from it.
    pub fn build(self) -> Result<ReplanController> {
        let config = match self.config {
            Some(config) => {
                config.validate()?;
                config
            }
            None => ClutchConfig::load(self.config_path.as_deref())?,
        };

        let generator: Arc<dyn PlanGenerator> = match self.generator {
            Some(generator) => generator,
            None => Arc::new(HttpPlanGenerator::from_config(&config.generator)?),
        };

        Ok(ReplanController::new(generator, config))
    }
}

impl fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("config", &self.config)
            .field("config_path", &self.config_path)
            .field("generator", &self.generator.as_ref().map(|_| "custom"))
            .finish()
    }
}
