//! Cookies: members thank each other, moderators take them back.

use crate::error::{positive_amount, CommandError};
use crate::framework::{guild_of, profile_key, Context, Error};
use crate::roles::sync_member_tiers;
use chrono::{DateTime, Duration, Utc};
use guildrank_common::UserId;
use guildrank_i18n::fluent_args;
use guildrank_progression::{cooldown_remaining, Profile};
use poise::serenity_prelude as serenity;
use tracing::info;

/// Records a gift by `giver`, refusing while the giver's cooldown runs.
pub fn mark_cookie_given(giver: &mut Profile, period: Duration, now: DateTime<Utc>) -> Result<(), CommandError> {
    if let Some(remaining) = cooldown_remaining(giver.last_cookie_given, period, now) {
        return Err(CommandError::Cooldown(remaining));
    }
    giver.last_cookie_given = Some(now);
    Ok(())
}

/// Cookie commands.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    subcommands("give", "balance", "remove"),
    subcommand_required
)]
pub async fn cookie(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Gives a cookie to another member.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn give(
    ctx: Context<'_>,
    #[description = "Member to thank"] user: serenity::User,
) -> Result<(), Error> {
    let guild = guild_of(ctx)?;
    let giver = ctx.author().id;
    if user.bot {
        return Err(CommandError::BotTarget.into());
    }
    if user.id == giver {
        return Err(CommandError::SelfCookie.into());
    }

    let settings = ctx.data().config.get();
    let store = &ctx.data().store;
    let (guild_key, giver_key) = profile_key(guild, giver);
    let receiver_key = UserId(user.id.get());

    store.update(guild_key, giver_key, |profile| {
        mark_cookie_given(profile, settings.config.economy.cookie_cooldown(), Utc::now())
    })?;
    let receiver = store.update(guild_key, receiver_key, |profile| {
        profile.award_cookies(1);
        profile.clone()
    });

    ctx.say(ctx.data().messages.get(
        "cookie-given",
        fluent_args![
            "giver" => giver_key.mention(),
            "receiver" => receiver_key.mention(),
            "total" => receiver.cookies,
        ]
        .as_ref(),
    ))
    .await?;
    info!("User {} gave a cookie to {} in guild {}", giver_key, receiver_key, guild_key);

    sync_member_tiers(ctx.http(), &settings.rules, guild, user.id, &receiver).await;
    Ok(())
}

/// Shows how many cookies a member has.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn balance(
    ctx: Context<'_>,
    #[description = "Member to look up"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let guild = guild_of(ctx)?;
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    if target.bot {
        return Err(CommandError::BotTarget.into());
    }

    let (guild_key, user_key) = profile_key(guild, target.id);
    let profile = ctx.data().store.get(guild_key, user_key);

    ctx.say(ctx.data().messages.get(
        "cookie-balance",
        fluent_args!["user" => target.name.clone(), "cookies" => profile.cookies].as_ref(),
    ))
    .await?;
    Ok(())
}

/// Takes cookies away from a member.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Member to take cookies from"] user: serenity::User,
    #[description = "How many cookies"] amount: i64,
) -> Result<(), Error> {
    let guild = guild_of(ctx)?;
    let amount = positive_amount(amount)?;
    if user.bot {
        return Err(CommandError::BotTarget.into());
    }

    let settings = ctx.data().config.get();
    let (guild_key, user_key) = profile_key(guild, user.id);
    let (removed, profile) = ctx.data().store.update(guild_key, user_key, |profile| {
        (profile.deduct_cookies(amount), profile.clone())
    });

    ctx.say(ctx.data().messages.get(
        "cookie-removed",
        fluent_args![
            "amount" => removed,
            "user" => user_key.mention(),
            "total" => profile.cookies,
        ]
        .as_ref(),
    ))
    .await?;
    info!(
        "User {} removed {} cookies from {} in guild {}",
        ctx.author().id,
        removed,
        user_key,
        guild_key
    );

    sync_member_tiers(ctx.http(), &settings.rules, guild, user.id, &profile).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildrank_common::test_utils::mock_timestamp;

    #[test]
    fn test_first_gift_is_allowed() {
        let mut giver = Profile::default();
        let now = mock_timestamp(2024, 6, 1, 10, 0, 0);

        mark_cookie_given(&mut giver, Duration::minutes(60), now).unwrap();
        assert_eq!(giver.last_cookie_given, Some(now));
    }

    #[test]
    fn test_gift_cooldown_is_per_giver() {
        let mut giver = Profile::default();
        let period = Duration::minutes(60);
        mark_cookie_given(&mut giver, period, mock_timestamp(2024, 6, 1, 10, 0, 0)).unwrap();

        let error = mark_cookie_given(&mut giver, period, mock_timestamp(2024, 6, 1, 10, 45, 0)).unwrap_err();
        assert!(matches!(error, CommandError::Cooldown(remaining) if remaining == Duration::minutes(15)));

        // Someone else can still give
        let mut other = Profile::default();
        assert!(mark_cookie_given(&mut other, period, mock_timestamp(2024, 6, 1, 10, 45, 0)).is_ok());
    }
}
