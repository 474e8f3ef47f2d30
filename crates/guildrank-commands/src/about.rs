//! About command implementation using Poise's command macro.

use crate::framework::{Context, Error};
use poise::serenity_prelude as serenity;

/// Shows information about the bot.
#[poise::command(slash_command, prefix_command)]
pub async fn about(ctx: Context<'_>) -> Result<(), Error> {
    let messages = &ctx.data().messages;
    let commands = ctx
        .framework()
        .options()
        .commands
        .iter()
        .map(|command| format!("`/{}`", command.name))
        .collect::<Vec<_>>()
        .join(" ");

    let embed = serenity::CreateEmbed::new()
        .title(messages.text("about-title"))
        .description(messages.text("about-description"))
        .field(messages.text("about-version"), env!("CARGO_PKG_VERSION"), true)
        .field(messages.text("about-commands"), commands, false)
        .colour(serenity::Colour::BLURPLE);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
