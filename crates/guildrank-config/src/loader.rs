//! Configuration loading and persistence with atomic file operations.

use crate::cache::LoadedConfig;
use crate::schema::Config;
use guildrank_common::{write_atomic, GuildRankError};
use guildrank_progression::ProgressionError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "GUILDRANK_CONFIG_PATH";

/// Files tried in the working directory when no path is given.
const DEFAULT_PATHS: [&str; 2] = ["config.yaml", "config.yml"];

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading or writing the configuration file.
    #[error("Failed to access configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization error.
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A setting has an unusable value.
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// The curve or a tier table was rejected by the progression engine.
    #[error("Configuration validation failed: {0}")]
    Progression(#[from] ProgressionError),

    /// Environment variable parsing error.
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable name.
        var: String,
        /// Parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The operation needs a configuration file but none is known.
    #[error("No configuration file path is set")]
    MissingPath,

    /// File watcher error.
    #[error("Failed to watch configuration file: {0}")]
    Watch(#[from] notify::Error),
}

impl From<ConfigError> for GuildRankError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Configuration loader with atomic file operations.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader bound to a specific file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Resolves the configuration file: `explicit`, then
    /// `GUILDRANK_CONFIG_PATH`, then `config.yaml`/`config.yml` in the
    /// working directory. Without any of them the loader serves defaults.
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                DEFAULT_PATHS
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
            });
        Self { path }
    }

    /// The configuration file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parses YAML into a configuration without validating it.
    pub fn parse(yaml: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads, applies environment overrides, and validates.
    pub async fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let mut config = match &self.path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::parse(&tokio::fs::read_to_string(path).await?)?
            }
            None => {
                info!("No configuration file found, using defaults");
                Config::default()
            }
        };

        apply_env_overrides(&mut config, |var| env::var(var).ok())?;
        LoadedConfig::new(config)
    }

    /// Saves configuration to file atomically.
    pub async fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let path = self.path.as_deref().ok_or(ConfigError::MissingPath)?;
        let yaml = serde_yaml::to_string(config)?;
        write_atomic(path, yaml.as_bytes())?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Applies environment overrides, reading variables through `lookup`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup("DISCORD_TOKEN") {
        config.discord.token = token;
    }

    if let Some(prefix) = lookup("GUILDRANK_PREFIX") {
        config.discord.prefix = prefix;
    }

    if let Some(level) = lookup("GUILDRANK_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(path) = lookup("GUILDRANK_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    }

    if let Some(xp) = lookup("GUILDRANK_MESSAGE_XP") {
        config.leveling.message_xp = xp.trim().parse().map_err(|e| ConfigError::EnvParse {
            var: "GUILDRANK_MESSAGE_XP".to_string(),
            source: Box::new(e),
        })?;
    }

    Ok(())
}
