//! Integration tests for guildrank-bot crate.
//!
//! These cover startup wiring that does not need a Discord connection.

use guildrank_bot::{required_intents, BotError, GuildRankBot};
use guildrank_common::test_utils::{config_fixtures, create_temp_dir, discord_fixtures, init_test_logging};
use guildrank_config::{ConfigLoader, LoadedConfig};
use poise::serenity_prelude as serenity;

fn loaded_with_storage(path: &std::path::Path) -> LoadedConfig {
    let mut config = ConfigLoader::parse(config_fixtures::full_config_yaml()).unwrap();
    config.storage.path = path.to_path_buf();
    LoadedConfig::new(config).unwrap()
}

#[test]
fn test_intents_cover_message_xp() {
    let intents = required_intents();
    assert!(intents.contains(serenity::GatewayIntents::GUILD_MESSAGES));
    assert!(intents.contains(serenity::GatewayIntents::MESSAGE_CONTENT));
    assert!(!intents.contains(serenity::GatewayIntents::GUILD_PRESENCES));
}

#[tokio::test]
async fn test_profiles_persist_across_instances() {
    init_test_logging();
    let dir = create_temp_dir();
    let path = dir.path().join("profiles.json");
    let guild = discord_fixtures::test_guild_id();
    let user = discord_fixtures::test_user_id();

    let bot = GuildRankBot::new(ConfigLoader::default(), loaded_with_storage(&path)).unwrap();
    assert!(bot.store().is_empty());
    bot.store().update(guild, user, |profile| profile.award_cookies(7));
    bot.save_profiles().await.unwrap();
    assert!(!bot.store().is_dirty());

    let restarted = GuildRankBot::new(ConfigLoader::default(), loaded_with_storage(&path)).unwrap();
    assert_eq!(restarted.store().get(guild, user).cookies, 7);
}

#[tokio::test]
async fn test_clean_store_is_not_written() {
    let dir = create_temp_dir();
    let path = dir.path().join("profiles.json");

    let bot = GuildRankBot::new(ConfigLoader::default(), loaded_with_storage(&path)).unwrap();
    bot.save_profiles().await.unwrap();

    assert!(!path.exists());
}

#[test]
fn test_corrupt_snapshot_fails_startup() {
    let dir = create_temp_dir();
    let path = dir.path().join("profiles.json");
    std::fs::write(&path, "[]]").unwrap();

    let result = GuildRankBot::new(ConfigLoader::default(), loaded_with_storage(&path));
    assert!(matches!(result, Err(BotError::Common(_))));
}
