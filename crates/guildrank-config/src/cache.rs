//! Thread-safe configuration caching with arc-swap for lock-free reads.

use crate::loader::ConfigError;
use crate::schema::Config;
use crate::validator::ConfigValidator;
use arc_swap::ArcSwap;
use guildrank_progression::ProgressionRules;
use std::sync::Arc;

/// A validated configuration together with the ladders built from it.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Raw settings.
    pub config: Config,
    /// Curve and tier tables.
    pub rules: ProgressionRules,
}

impl LoadedConfig {
    /// Validates `config` and builds its rules.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let rules = ConfigValidator::validate(&config)?;
        Ok(Self { config, rules })
    }
}

/// Thread-safe configuration cache using arc-swap for lock-free reads.
///
/// Readers keep the snapshot they loaded for the whole operation, so a
/// reload never changes the curve halfway through a command.
pub struct ConfigCache {
    current: ArcSwap<LoadedConfig>,
}

impl ConfigCache {
    /// Creates a new configuration cache with the given initial configuration.
    pub fn new(loaded: LoadedConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(loaded),
        }
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<LoadedConfig> {
        self.current.load_full()
    }

    /// Replaces the configuration atomically.
    pub fn update(&self, loaded: LoadedConfig) {
        self.current.store(Arc::new(loaded));
    }

    /// Validates `config` and swaps it in; the old one stays on failure.
    pub fn try_update(&self, config: Config) -> Result<(), ConfigError> {
        self.update(LoadedConfig::new(config)?);
        Ok(())
    }
}
