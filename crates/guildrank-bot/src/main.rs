//! Main entry point for guildrank.

use anyhow::{Context, Result};
use clap::Parser;
use guildrank_bot::{init_logging, GuildRankBot};
use guildrank_config::ConfigLoader;
use std::path::PathBuf;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "GUILDRANK_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loader = ConfigLoader::discover(args.config);
    let loaded = loader.load().await.context("Failed to load configuration")?;

    let _guard = init_logging(&loaded.config.logging, args.log_level.as_deref())?;
    info!("Starting guildrank {}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = loader.path() {
        info!("Configuration loaded from {}", path.display());
    }

    let bot = GuildRankBot::new(loader, loaded)?;
    if let Err(e) = bot.start().await {
        error!("Bot stopped with an error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
