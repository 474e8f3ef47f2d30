//! Gateway events: message XP and level-up notices.

use crate::cooldown::CooldownKey;
use crate::framework::{profile_key, xp_delta, Data, Error};
use crate::roles::{snowflake, sync_member_tiers};
use guildrank_common::UserId;
use guildrank_i18n::fluent_args;
use poise::serenity_prelude as serenity;
use tracing::{debug, info, warn};

/// Central event handler for Discord events.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Connected as {}", data_about_bot.user.name);
        }
        serenity::FullEvent::Message { new_message } => {
            handle_message(ctx, new_message, data).await?;
        }
        _ => {}
    }
    Ok(())
}

async fn handle_message(ctx: &serenity::Context, message: &serenity::Message, data: &Data) -> Result<(), Error> {
    if message.author.bot {
        return Ok(());
    }
    let Some(guild) = message.guild_id else {
        return Ok(());
    };

    let settings = data.config.get();
    let leveling = &settings.config.leveling;
    if leveling.message_xp == 0 {
        return Ok(());
    }

    let (guild_key, user_key) = profile_key(guild, message.author.id);
    if data
        .cooldowns
        .try_acquire(CooldownKey::MessageXp(guild_key, user_key), leveling.message_cooldown())
        .is_err()
    {
        return Ok(());
    }

    let (levels_gained, profile) = data.store.update(guild_key, user_key, |profile| {
        profile
            .award_xp(&settings.rules.curve, xp_delta(leveling.message_xp))
            .map(|gained| (gained, profile.clone()))
    })?;
    debug!("Awarded {} message XP to user {} in guild {}", leveling.message_xp, user_key, guild_key);

    if levels_gained == 0 {
        return Ok(());
    }

    info!("User {} reached level {} in guild {}", user_key, profile.level, guild_key);

    let notice = data.messages.get(
        "level-up",
        fluent_args!["user" => UserId(message.author.id.get()).mention(), "level" => profile.level].as_ref(),
    );
    let channel = settings
        .config
        .discord
        .level_up_channel_id
        .and_then(|id| snowflake::<serenity::ChannelId>(id.0).ok())
        .unwrap_or(message.channel_id);
    if let Err(e) = channel.say(&ctx.http, notice).await {
        warn!("Failed to post level-up notice in channel {}: {}", channel, e);
    }

    sync_member_tiers(&ctx.http, &settings.rules, guild, message.author.id, &profile).await;
    Ok(())
}
