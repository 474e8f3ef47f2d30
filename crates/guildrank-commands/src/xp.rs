//! XP moderation.

use crate::error::{positive_amount, CommandError};
use crate::framework::{guild_of, profile_key, xp_delta, Context, Error};
use crate::roles::sync_member_tiers;
use guildrank_i18n::fluent_args;
use guildrank_progression::{GrowthCurve, Profile, Result as ProgressionResult, MAX_SUPPORTED_LEVEL};
use poise::serenity_prelude as serenity;
use tracing::info;

/// Accepts levels the curve supports.
pub fn checked_level(level: i64) -> Result<i64, CommandError> {
    if (0..=i64::from(MAX_SUPPORTED_LEVEL)).contains(&level) {
        Ok(level)
    } else {
        Err(CommandError::InvalidLevel(level))
    }
}

/// XP moderation commands.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    subcommands("add", "remove", "setlevel"),
    subcommand_required,
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn xp(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Awards XP to a member.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Member to award"] user: serenity::User,
    #[description = "XP to add"] amount: i64,
) -> Result<(), Error> {
    let amount = positive_amount(amount)?;
    adjust(ctx, user, "xp-added", amount, |profile, curve| {
        profile.award_xp(curve, xp_delta(amount)).map(drop)
    })
    .await
}

/// Removes XP from a member.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Member to penalize"] user: serenity::User,
    #[description = "XP to remove"] amount: i64,
) -> Result<(), Error> {
    let amount = positive_amount(amount)?;
    adjust(ctx, user, "xp-removed", amount, |profile, curve| {
        profile.deduct_xp(curve, xp_delta(amount)).map(drop)
    })
    .await
}

/// Sets a member's level, clearing in-level XP.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn setlevel(
    ctx: Context<'_>,
    #[description = "Member to change"] user: serenity::User,
    #[description = "New level"] level: i64,
) -> Result<(), Error> {
    let level = checked_level(level)?;
    adjust(ctx, user, "xp-level-set", 0, |profile, curve| profile.set_level(curve, level)).await
}

async fn adjust<F>(ctx: Context<'_>, user: serenity::User, reply_key: &str, amount: u64, change: F) -> Result<(), Error>
where
    F: FnOnce(&mut Profile, &GrowthCurve) -> ProgressionResult<()>,
{
    let guild = guild_of(ctx)?;
    if user.bot {
        return Err(CommandError::BotTarget.into());
    }

    let settings = ctx.data().config.get();
    let (guild_key, user_key) = profile_key(guild, user.id);
    let profile = ctx.data().store.update(guild_key, user_key, |profile| {
        change(profile, &settings.rules.curve).map(|()| profile.clone())
    })?;

    ctx.say(ctx.data().messages.get(
        reply_key,
        fluent_args![
            "amount" => amount,
            "user" => user_key.mention(),
            "level" => profile.level,
        ]
        .as_ref(),
    ))
    .await?;
    info!(
        "User {} ran {} on {} in guild {}, now level {}",
        ctx.author().id,
        reply_key,
        user_key,
        guild_key,
        profile.level
    );

    sync_member_tiers(ctx.http(), &settings.rules, guild, user.id, &profile).await;
    Ok(())
}
