//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            leveling: LevelingConfig::default(),
            economy: EconomyConfig::default(),
            level_roles: Vec::new(),
            cookie_roles: Vec::new(),
            jobs: Vec::new(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: "!".to_string(),
            level_up_channel_id: None,
        }
    }
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            base: 100,
            exponent: 1.5,
            message_xp: 15,
            message_cooldown_seconds: 60,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            daily_coins: 250,
            daily_xp: 50,
            daily_cooldown_hours: 24,
            work_cooldown_minutes: 60,
            cookie_cooldown_minutes: 60,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/profiles.json"),
            autosave_seconds: 300,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_path: None,
        }
    }
}
