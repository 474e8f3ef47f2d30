//! Poise framework setup and command registration logic.

use crate::cooldown::CooldownManager;
use crate::error::CommandError;
use crate::store::ProfileStore;
use chrono::{DateTime, Utc};
use guildrank_common::{truncate_string, GuildId, UserId};
use guildrank_config::{ConfigCache, ConfigLoader};
use guildrank_i18n::{fluent_args, Messages};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Application data accessible in all commands.
pub struct Data {
    /// Live configuration and progression rules.
    pub config: Arc<ConfigCache>,
    /// Where the configuration came from, for `/reload`.
    pub loader: ConfigLoader,
    /// Member profiles.
    pub store: Arc<ProfileStore>,
    /// Reply catalogue.
    pub messages: Arc<Messages>,
    /// Message XP cooldowns.
    pub cooldowns: Arc<CooldownManager>,
    /// Process start, for `/uptime`.
    pub started_at: DateTime<Utc>,
}

impl Data {
    /// Bundles shared state; the clock for `/uptime` starts now.
    pub fn new(
        config: Arc<ConfigCache>,
        loader: ConfigLoader,
        store: Arc<ProfileStore>,
        messages: Arc<Messages>,
    ) -> Self {
        Self {
            config,
            loader,
            store,
            messages,
            cooldowns: Arc::new(CooldownManager::new()),
            started_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("config", &"<ConfigCache>")
            .field("loader", &self.loader)
            .field("profiles", &self.store.len())
            .field("messages", &self.messages)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Guild the command runs in.
pub fn guild_of(ctx: Context<'_>) -> Result<serenity::GuildId, CommandError> {
    ctx.guild_id().ok_or(CommandError::GuildOnly)
}

/// Store key for a Discord member.
pub fn profile_key(guild: serenity::GuildId, user: serenity::UserId) -> (GuildId, UserId) {
    (GuildId(guild.get()), UserId(user.get()))
}

/// Configured XP amounts as a curve delta.
pub fn xp_delta(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Longest error text echoed back to a user.
const MAX_REASON_LENGTH: usize = 200;

/// User-facing summary of an unexpected error.
pub fn error_reason(error: &(dyn std::error::Error + Send + Sync)) -> String {
    truncate_string(&error.to_string(), MAX_REASON_LENGTH)
}

/// Every command the bot registers.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::rank::rank(),
        crate::rank::leaderboard(),
        crate::daily::daily(),
        crate::work::work(),
        crate::work::jobs(),
        crate::cookie::cookie(),
        crate::xp::xp(),
        crate::tiers::tiers(),
        crate::about::about(),
        crate::uptime::uptime(),
        crate::reload::reload(),
    ]
}

/// Framework options with commands, error hook and event handler.
pub fn framework_options(prefix: &str) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands(),
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, framework, data| {
            Box::pin(crate::events::event_handler(ctx, event, framework, data))
        },
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(prefix.to_string()),
            mention_as_prefix: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates a new Poise framework.
pub fn create_framework(prefix: &str) -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(framework_options(prefix))
}

/// Global error handler for the framework.
///
/// [`CommandError`]s are expected refusals and are answered quietly. Anything
/// else is logged and reported with a generic reply.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let messages = &ctx.data().messages;
            let reply = match error.downcast_ref::<CommandError>() {
                Some(refusal) => {
                    debug!("Command '{}' refused: {}", ctx.command().name, refusal);
                    refusal.render(messages)
                }
                None => {
                    error!("Error in command '{}': {:?}", ctx.command().name, error);
                    messages.get(
                        "error-generic",
                        fluent_args!["reason" => error_reason(&*error)].as_ref(),
                    )
                }
            };

            let response = poise::CreateReply::default().content(reply).ephemeral(true);
            if let Err(e) = ctx.send(response).await {
                warn!("Failed to send error reply: {}", e);
            }
        }
        poise::FrameworkError::MissingUserPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            let permissions = missing_permissions
                .map_or_else(|| "required".to_string(), |permissions| permissions.to_string());
            let reply = ctx.data().messages.get(
                "error-missing-permissions",
                fluent_args!["permissions" => permissions].as_ref(),
            );
            let response = poise::CreateReply::default().content(reply).ephemeral(true);
            if let Err(e) = ctx.send(response).await {
                warn!("Failed to send permission reply: {}", e);
            }
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!("Error in event handler for {}: {:?}", event.snake_case_name(), error);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
