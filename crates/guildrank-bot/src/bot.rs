//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use guildrank_commands::{create_framework, CooldownManager, Data, ProfileStore};
use guildrank_config::{ConfigCache, ConfigError, ConfigLoader, ConfigWatcher, LoadedConfig};
use guildrank_i18n::{Messages, DEFAULT_LOCALE};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Gateway intents the bot needs: guild events and message content for
/// message XP and prefix commands.
pub fn required_intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
}

/// Main bot structure.
pub struct GuildRankBot {
    loader: ConfigLoader,
    config: Arc<ConfigCache>,
    store: Arc<ProfileStore>,
    messages: Arc<Messages>,
}

impl GuildRankBot {
    /// Prepares the bot from a loaded configuration, reading the profile
    /// snapshot it points at.
    pub fn new(loader: ConfigLoader, loaded: LoadedConfig) -> BotResult<Self> {
        let store = ProfileStore::load(&loaded.config.storage.path)?;
        let messages = Messages::new(DEFAULT_LOCALE)?;

        Ok(Self {
            loader,
            config: Arc::new(ConfigCache::new(loaded)),
            store: Arc::new(store),
            messages: Arc::new(messages),
        })
    }

    /// Shared profile store.
    pub fn store(&self) -> &Arc<ProfileStore> {
        &self.store
    }

    /// Writes the profile snapshot if anything changed.
    pub async fn save_profiles(&self) -> BotResult<()> {
        save_if_dirty(Arc::clone(&self.store), Arc::clone(&self.config)).await
    }

    /// Connects to Discord and runs until shutdown, then saves profiles.
    pub async fn start(self) -> BotResult<()> {
        let settings = self.config.get();
        let data = Data::new(
            Arc::clone(&self.config),
            self.loader.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.messages),
        );
        let cooldowns = Arc::clone(&data.cooldowns);

        let framework = create_framework(&settings.config.discord.prefix)
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Bot connected as: {}", ready.user.name);
                    info!("Connected to {} guilds", ready.guilds.len());
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Slash commands registered globally");
                    Ok(data)
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&settings.config.discord.token, required_intents())
            .framework(framework)
            .await?;
        info!("Discord client created");

        let _watcher = match ConfigWatcher::spawn(self.loader.clone(), Arc::clone(&self.config)) {
            Ok(watcher) => Some(watcher),
            Err(ConfigError::MissingPath) => {
                debug!("No configuration file to watch");
                None
            }
            Err(e) => {
                warn!("Configuration hot reload disabled: {}", e);
                None
            }
        };
        let autosave = spawn_autosave(Arc::clone(&self.store), Arc::clone(&self.config), cooldowns);

        // Set up graceful shutdown handling
        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {:?}", e);
                return;
            }
            info!("Received shutdown signal, starting graceful shutdown");
            shard_manager.shutdown_all().await;
        });

        info!("guildrank is starting up...");
        let result = client.start().await;

        autosave.abort();
        if let Err(e) = self.save_profiles().await {
            error!("Failed to save profiles on shutdown: {}", e);
        }
        info!("guildrank has shut down");

        result?;
        Ok(())
    }
}

async fn save_if_dirty(store: Arc<ProfileStore>, config: Arc<ConfigCache>) -> BotResult<()> {
    if !store.is_dirty() {
        return Ok(());
    }
    let path = config.get().config.storage.path.clone();
    let saved = Arc::clone(&store);
    tokio::task::spawn_blocking(move || saved.save(&path))
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))??;
    info!("Saved {} profiles", store.len());
    Ok(())
}

/// Periodically saves dirty profiles and prunes stale message cooldowns.
///
/// The interval is re-read every round so a reload takes effect.
pub fn spawn_autosave(
    store: Arc<ProfileStore>,
    config: Arc<ConfigCache>,
    cooldowns: Arc<CooldownManager>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let settings = config.get();
            let every = Duration::from_secs(settings.config.storage.autosave_seconds.max(1));
            let cooldown = settings.config.leveling.message_cooldown();
            drop(settings);

            tokio::time::sleep(every).await;

            if let Err(e) = save_if_dirty(Arc::clone(&store), Arc::clone(&config)).await {
                error!("Autosave failed: {}", e);
            }
            cooldowns.cleanup_expired(cooldown);
        }
    })
}
