//! Uptime command accessing framework data through Poise's context.

use crate::framework::{Context, Error};
use chrono::Utc;
use guildrank_common::format_duration;
use guildrank_i18n::fluent_args;

/// Shows bot uptime.
#[poise::command(slash_command, prefix_command)]
pub async fn uptime(ctx: Context<'_>) -> Result<(), Error> {
    let elapsed = Utc::now() - ctx.data().started_at;
    let response = ctx.data().messages.get(
        "uptime",
        fluent_args!["uptime" => format_duration(elapsed)].as_ref(),
    );
    ctx.say(response).await?;
    Ok(())
}
