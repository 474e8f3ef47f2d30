//! Errors that end a command with a reply to the invoking member.

use chrono::Duration;
use guildrank_common::format_duration;
use guildrank_i18n::{fluent_args, Messages};
use guildrank_progression::{ProgressionError, MAX_SUPPORTED_LEVEL};
use thiserror::Error;

/// A command refused to run because of what the member asked for.
///
/// The framework error hook renders these as ephemeral replies instead of
/// logging them as failures.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command needs a guild.
    #[error("command used outside a guild")]
    GuildOnly,

    /// The action is still cooling down.
    #[error("on cooldown for another {}s", .0.num_seconds())]
    Cooldown(Duration),

    /// Amounts must be strictly positive.
    #[error("amount must be positive, got {0}")]
    InvalidAmount(i64),

    /// Levels must be inside the supported range.
    #[error("level out of range: {0}")]
    InvalidLevel(i64),

    /// Bots have no profiles.
    #[error("bots have no profiles")]
    BotTarget,

    /// A member tried to gift themselves.
    #[error("cannot give a cookie to yourself")]
    SelfCookie,

    /// The progression engine rejected the operation.
    #[error(transparent)]
    Progression(#[from] ProgressionError),
}

impl CommandError {
    /// Localized reply for the member.
    pub fn render(&self, messages: &Messages) -> String {
        match self {
            Self::GuildOnly => messages.text("error-guild-only"),
            Self::Cooldown(remaining) => messages.get(
                "error-cooldown",
                fluent_args!["remaining" => format_duration(*remaining)].as_ref(),
            ),
            Self::InvalidAmount(_) => messages.text("error-invalid-amount"),
            Self::InvalidLevel(_) => messages.get(
                "error-invalid-level",
                fluent_args!["max" => MAX_SUPPORTED_LEVEL].as_ref(),
            ),
            Self::BotTarget => messages.text("error-bot-target"),
            Self::SelfCookie => messages.text("error-self-cookie"),
            Self::Progression(error) => messages.get(
                "error-generic",
                fluent_args!["reason" => error.to_string()].as_ref(),
            ),
        }
    }
}

/// Rejects zero and negative amounts.
pub fn positive_amount(amount: i64) -> Result<u64, CommandError> {
    u64::try_from(amount)
        .ok()
        .filter(|amount| *amount > 0)
        .ok_or(CommandError::InvalidAmount(amount))
}
