//! Daily reward.

use crate::error::CommandError;
use crate::framework::{guild_of, profile_key, xp_delta, Context, Error};
use crate::roles::sync_member_tiers;
use chrono::{DateTime, Utc};
use guildrank_config::EconomyConfig;
use guildrank_i18n::fluent_args;
use guildrank_progression::{cooldown_remaining, Profile, ProgressionRules};
use tracing::info;

/// What a successful claim paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyReward {
    /// Coins awarded.
    pub coins: u64,
    /// XP awarded.
    pub xp: u64,
    /// Levels crossed by the XP.
    pub levels_gained: u32,
}

/// Pays the daily reward unless it was claimed within the cooldown.
pub fn claim_daily(
    profile: &mut Profile,
    rules: &ProgressionRules,
    economy: &EconomyConfig,
    now: DateTime<Utc>,
) -> Result<DailyReward, CommandError> {
    if let Some(remaining) = cooldown_remaining(profile.last_daily, economy.daily_cooldown(), now) {
        return Err(CommandError::Cooldown(remaining));
    }

    let levels_gained = profile.award_xp(&rules.curve, xp_delta(economy.daily_xp))?;
    profile.award_coins(economy.daily_coins);
    profile.last_daily = Some(now);

    Ok(DailyReward {
        coins: economy.daily_coins,
        xp: economy.daily_xp,
        levels_gained,
    })
}

/// Claims your daily coins and XP.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn daily(ctx: Context<'_>) -> Result<(), Error> {
    let guild = guild_of(ctx)?;
    let author = ctx.author().id;
    let (guild_key, user_key) = profile_key(guild, author);
    let settings = ctx.data().config.get();

    let (reward, profile) = ctx.data().store.update(guild_key, user_key, |profile| {
        claim_daily(profile, &settings.rules, &settings.config.economy, Utc::now())
            .map(|reward| (reward, profile.clone()))
    })?;

    let messages = &ctx.data().messages;
    let mut reply = messages.get(
        "daily-claimed",
        fluent_args!["coins" => reward.coins, "xp" => reward.xp].as_ref(),
    );
    if reward.levels_gained > 0 {
        reply.push('\n');
        reply.push_str(&messages.get(
            "level-up",
            fluent_args!["user" => user_key.mention(), "level" => profile.level].as_ref(),
        ));
    }
    ctx.say(reply).await?;
    info!("User {} claimed the daily reward in guild {}", user_key, guild_key);

    sync_member_tiers(ctx.http(), &settings.rules, guild, author, &profile).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildrank_common::test_utils::mock_timestamp;

    fn economy() -> EconomyConfig {
        EconomyConfig {
            daily_coins: 250,
            daily_xp: 150,
            daily_cooldown_hours: 24,
            ..EconomyConfig::default()
        }
    }

    #[test]
    fn test_first_claim_pays_and_levels() {
        let mut profile = Profile::default();
        let now = mock_timestamp(2024, 3, 1, 12, 0, 0);

        let reward = claim_daily(&mut profile, &ProgressionRules::default(), &economy(), now).unwrap();

        assert_eq!(reward.levels_gained, 1);
        assert_eq!(profile.coins, 250);
        assert_eq!((profile.level, profile.xp), (1, 50));
        assert_eq!(profile.last_daily, Some(now));
    }

    #[test]
    fn test_claim_within_cooldown_changes_nothing() {
        let mut profile = Profile::default();
        let rules = ProgressionRules::default();
        let first = mock_timestamp(2024, 3, 1, 12, 0, 0);
        claim_daily(&mut profile, &rules, &economy(), first).unwrap();
        let before = profile.clone();

        let error = claim_daily(&mut profile, &rules, &economy(), mock_timestamp(2024, 3, 2, 6, 0, 0)).unwrap_err();

        assert!(matches!(error, CommandError::Cooldown(remaining) if remaining == chrono::Duration::hours(6)));
        assert_eq!(profile, before);
    }

    #[test]
    fn test_claim_after_cooldown() {
        let mut profile = Profile::default();
        let rules = ProgressionRules::default();
        claim_daily(&mut profile, &rules, &economy(), mock_timestamp(2024, 3, 1, 12, 0, 0)).unwrap();

        assert!(claim_daily(&mut profile, &rules, &economy(), mock_timestamp(2024, 3, 2, 12, 0, 0)).is_ok());
        assert_eq!(profile.coins, 500);
    }
}
