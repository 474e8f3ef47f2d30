//! Application-wide error types using thiserror.

use guildrank_common::GuildRankError;
use guildrank_config::ConfigError;
use guildrank_i18n::I18nError;
use poise::serenity_prelude as serenity;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Profile storage or other shared error.
    #[error(transparent)]
    Common(#[from] GuildRankError),

    /// The message catalogue failed to build.
    #[error("Localization error: {0}")]
    I18n(#[from] I18nError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
