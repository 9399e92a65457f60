//! Configuration loading utilities

use crate::Config;
use sdg_common::SdgError;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SDG_CONFIG_PATH";

/// Configuration files tried, in order, when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["config.yaml", "config.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    IoError {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] SdgError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the variable
        var: String,
        /// Parse failure for its value
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for SdgError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let mut config = Self::read_file(path.as_ref())?;

        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from the first available source, without validating.
    ///
    /// Resolution order: `explicit`, then `SDG_CONFIG_PATH`, then
    /// `config.yaml` / `config.yml` in the working directory, then defaults.
    /// Environment overrides are applied on top of whichever source won.
    /// Callers apply their own overrides and then call [`Config::validate`],
    /// so a bad file value can still be replaced before it is checked.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                DEFAULT_CONFIG_FILES
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
            });

        let mut config = match path {
            Some(path) => Self::read_file(&path)?,
            None => {
                info!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Parse a YAML document without overrides or validation
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn read_file(path: &Path) -> Result<Config, ConfigError> {
        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply process environment overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides resolved through `lookup`, keyed by variable name
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("SDG_BIND_ADDRESS") {
            config.server.bind_address = bind;
        }

        if let Some(path) = lookup("SDG_DATA_PATH") {
            config.dataset.path = PathBuf::from(path);
        }

        if let Some(level) = lookup("SDG_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("SDG_LOG_FORMAT") {
            config.logging.format = format;
        }

        if let Some(enabled) = lookup("SDG_CACHE_ENABLED") {
            config.pipeline.cache_enabled = parse_var("SDG_CACHE_ENABLED", &enabled)?;
        }

        if let Some(capacity) = lookup("SDG_CACHE_CAPACITY") {
            config.pipeline.cache_capacity = parse_var("SDG_CACHE_CAPACITY", &capacity)?;
        }

        if let Some(width) = lookup("SDG_GRAPH_WIDTH") {
            config.graphs.width = parse_var("SDG_GRAPH_WIDTH", &width)?;
        }

        if let Some(height) = lookup("SDG_GRAPH_HEIGHT") {
            config.graphs.height = parse_var("SDG_GRAPH_HEIGHT", &height)?;
        }

        debug!("Applied environment overrides");
        Ok(())
    }
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim().parse::<T>().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}
