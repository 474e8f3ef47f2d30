//! Owner command to re-read the configuration file.

use crate::framework::{Context, Error};
use guildrank_config::reload as reload_config;
use guildrank_i18n::fluent_args;
use tracing::{info, warn};

/// Reloads the configuration file.
///
/// Ladders and rewards take effect immediately; the command prefix and
/// token need a restart.
#[poise::command(slash_command, prefix_command, owners_only, ephemeral)]
pub async fn reload(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let reply = match reload_config(&data.loader, &data.config).await {
        Ok(()) => {
            info!("Configuration reloaded by {}", ctx.author().id);
            data.messages.text("reload-done")
        }
        Err(e) => {
            warn!("Configuration reload by {} failed: {}", ctx.author().id, e);
            data.messages.get("reload-failed", fluent_args!["reason" => e.to_string()].as_ref())
        }
    };
    ctx.say(reply).await?;
    Ok(())
}
