//! Configured role ladders.

use crate::framework::{Context, Error};
use guildrank_i18n::{fluent_args, Messages};
use guildrank_progression::{RankTier, TierTable};
use poise::serenity_prelude as serenity;

/// Lists the configured role tiers.
#[poise::command(slash_command, prefix_command, subcommands("levels", "cookies"), subcommand_required)]
pub async fn tiers(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Roles unlocked by level.
#[poise::command(slash_command, prefix_command)]
pub async fn levels(ctx: Context<'_>) -> Result<(), Error> {
    let settings = ctx.data().config.get();
    show(ctx, "tiers-levels-title", "tiers-level-entry", &settings.rules.level_roles).await
}

/// Roles unlocked by cookies.
#[poise::command(slash_command, prefix_command)]
pub async fn cookies(ctx: Context<'_>) -> Result<(), Error> {
    let settings = ctx.data().config.get();
    show(ctx, "tiers-cookies-title", "tiers-cookie-entry", &settings.rules.cookie_roles).await
}

/// One line per tier, lowest first.
pub fn render_table(messages: &Messages, entry_key: &str, table: &TierTable<RankTier>) -> String {
    if table.is_empty() {
        return messages.text("tiers-empty");
    }
    table
        .iter()
        .map(|tier| {
            messages.get(
                entry_key,
                fluent_args!["role" => tier.role_id.mention(), "threshold" => tier.threshold].as_ref(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

async fn show(ctx: Context<'_>, title_key: &str, entry_key: &str, table: &TierTable<RankTier>) -> Result<(), Error> {
    let messages = &ctx.data().messages;
    let embed = serenity::CreateEmbed::new()
        .title(messages.text(title_key))
        .description(render_table(messages, entry_key, table))
        .colour(serenity::Colour::BLURPLE);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
