//! Configuration schema definitions using serde.

use guildrank_common::ChannelId;
use guildrank_progression::{JobTier, RankTier};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for guildrank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// XP curve and message rewards.
    pub leveling: LevelingConfig,
    /// Coins, cookies and cooldowns.
    pub economy: EconomyConfig,
    /// Roles awarded by level, ascending by threshold.
    pub level_roles: Vec<RankTier>,
    /// Roles awarded by cookies received, ascending by threshold.
    pub cookie_roles: Vec<RankTier>,
    /// Job ladder, ascending by `min_works`.
    pub jobs: Vec<JobTier>,
    /// Profile snapshot storage.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Prefix for text commands.
    pub prefix: String,
    /// Channel for level-up notices; the message's own channel when unset.
    pub level_up_channel_id: Option<ChannelId>,
}

/// Leveling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelingConfig {
    /// XP needed to leave level 0.
    pub base: u64,
    /// Growth exponent of the XP curve.
    pub exponent: f64,
    /// XP awarded per eligible chat message.
    pub message_xp: u64,
    /// Minimum seconds between XP-earning messages per member.
    pub message_cooldown_seconds: u64,
}

/// Economy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Coins paid by `/daily`.
    pub daily_coins: u64,
    /// XP paid by `/daily`.
    pub daily_xp: u64,
    /// Hours between `/daily` claims.
    pub daily_cooldown_hours: u32,
    /// Minutes between `/work` shifts.
    pub work_cooldown_minutes: u32,
    /// Minutes between cookies given by the same member.
    pub cookie_cooldown_minutes: u32,
}

/// Profile storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON snapshot path.
    pub path: PathBuf,
    /// Seconds between automatic snapshots.
    pub autosave_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `guildrank_commands=debug`.
    pub level: String,
    /// Emit JSON lines instead of human readable output.
    pub json_format: bool,
    /// Daily-rolling log file, in addition to stdout.
    pub file_path: Option<PathBuf>,
}

impl EconomyConfig {
    /// `/daily` cooldown.
    pub fn daily_cooldown(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.daily_cooldown_hours))
    }

    /// `/work` cooldown.
    pub fn work_cooldown(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.work_cooldown_minutes))
    }

    /// Cookie giving cooldown.
    pub fn cookie_cooldown(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.cookie_cooldown_minutes))
    }
}

impl LevelingConfig {
    /// Message XP cooldown.
    pub const fn message_cooldown(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.message_cooldown_seconds)
    }
}
