//! Configuration loader
//!
//! Loads configuration from defaults, a TOML file and environment variables,
//! then validates it.

use crate::config::{AppConfig, InjectorConfig, LoggingConfig, ResolverConfig};
use crate::constants::{
    CONFIG_ENV_NESTING, CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rsm_application::protocol_registry::normalize_base_uri;
use rsm_domain::error::{Error, Result};
use rsm_domain::value_objects::BaseConfiguration;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, else the first default location found)
    /// 3. Environment variables with prefix (e.g., `RSM_LOGGING__LEVEL`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) if config_path.exists() => {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            Some(config_path) => log_config_loaded(config_path, false),
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_NESTING),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    validate_resolver_config(&config.resolver)?;
    validate_injector_config(&config.injector)?;
    config.bases.iter().try_for_each(validate_base_config)
}

fn validate_resolver_config(config: &ResolverConfig) -> Result<()> {
    if config.default_export.is_empty() {
        return Err(Error::configuration("Default export name cannot be empty"));
    }
    if config.loadable_extension.is_empty() || config.loadable_extension.contains('.') {
        return Err(Error::configuration(format!(
            "Loadable extension must be a bare extension, got '{}'",
            config.loadable_extension
        )));
    }
    Ok(())
}

fn validate_injector_config(config: &InjectorConfig) -> Result<()> {
    if config.boundary_attribute.trim().is_empty() {
        return Err(Error::configuration("Boundary attribute cannot be empty"));
    }
    Ok(())
}

fn validate_base_config(config: &BaseConfiguration) -> Result<()> {
    normalize_base_uri(&config.base_uri).map_err(|e| {
        Error::configuration(format!("Invalid base URI '{}': {e}", config.base_uri))
    })?;
    if let Some(scheme) = config.protocol.keys().find(|scheme| scheme.is_empty()) {
        return Err(Error::configuration(format!(
            "Empty scheme alias '{scheme}' for base '{}'",
            config.base_uri
        )));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set resolver naming conventions
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.config.resolver = resolver;
        self
    }

    /// Set the injection boundary attribute
    pub fn with_boundary_attribute<S: Into<String>>(mut self, attribute: S) -> Self {
        self.config.injector.boundary_attribute = attribute.into();
        self
    }

    /// Add a base configuration
    pub fn with_base(mut self, base: BaseConfiguration) -> Self {
        self.config.bases.push(base);
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
