//! Work shifts and the job ladder.

use crate::error::CommandError;
use crate::framework::{guild_of, profile_key, Context, Error};
use crate::roles::sync_member_tiers;
use chrono::{DateTime, Utc};
use guildrank_config::EconomyConfig;
use guildrank_i18n::fluent_args;
use guildrank_progression::{cooldown_remaining, JobTier, Profile, ProgressionRules};
use poise::serenity_prelude as serenity;
use tracing::info;

/// Result of one shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOutcome {
    /// Coins paid by the job held during the shift.
    pub pay: u64,
    /// Job title and sub-tier after the shift.
    pub position: Option<(String, String)>,
    /// Set when the shift unlocked a new job.
    pub promoted_to: Option<String>,
    /// First job and the works still missing, when no job is held yet.
    pub next_job: Option<(String, u64)>,
}

/// Works one shift: pays the current job and counts the work.
pub fn perform_work(
    profile: &mut Profile,
    rules: &ProgressionRules,
    economy: &EconomyConfig,
    now: DateTime<Utc>,
) -> Result<WorkOutcome, CommandError> {
    if let Some(remaining) = cooldown_remaining(profile.last_work, economy.work_cooldown(), now) {
        return Err(CommandError::Cooldown(remaining));
    }

    let previous = rules.job(profile).map(|job| job.min_works);
    let pay = rules.job(profile).map_or(0, |job| job.pay);
    profile.record_work(pay, now);

    let current = rules.job_position(profile);
    let promoted_to = current
        .as_ref()
        .filter(|(job, _)| previous != Some(job.min_works))
        .map(|(job, _)| job.title.clone());
    let next_job = match current {
        Some(_) => None,
        None => rules
            .jobs
            .next_above(profile.successful_works)
            .map(|job| (job.title.clone(), job.min_works - profile.successful_works)),
    };

    Ok(WorkOutcome {
        pay,
        position: current.map(|(job, position)| (job.title.clone(), position.to_string())),
        promoted_to,
        next_job,
    })
}

/// Works range as shown on `/jobs`.
pub fn works_range(job: &JobTier) -> String {
    match job.max_works {
        Some(max) => format!("{}-{}", job.min_works, max),
        None => format!("{}+", job.min_works),
    }
}

/// Works a shift at your current job.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn work(ctx: Context<'_>) -> Result<(), Error> {
    let guild = guild_of(ctx)?;
    let author = ctx.author().id;
    let (guild_key, user_key) = profile_key(guild, author);
    let settings = ctx.data().config.get();

    let (outcome, profile) = ctx.data().store.update(guild_key, user_key, |profile| {
        perform_work(profile, &settings.rules, &settings.config.economy, Utc::now())
            .map(|outcome| (outcome, profile.clone()))
    })?;

    let messages = &ctx.data().messages;
    let mut reply = match (&outcome.position, &outcome.next_job) {
        (Some((job, sub_tier)), _) => messages.get(
            "work-done",
            fluent_args!["job" => job.clone(), "sub_tier" => sub_tier.clone(), "pay" => outcome.pay].as_ref(),
        ),
        (None, Some((job, remaining))) => messages.get(
            "work-no-job-yet",
            fluent_args!["job" => job.clone(), "remaining" => *remaining].as_ref(),
        ),
        (None, None) => messages.text("work-unemployed"),
    };
    if let Some(job) = &outcome.promoted_to {
        reply.push('\n');
        reply.push_str(&messages.get("work-promoted", fluent_args!["job" => job.clone()].as_ref()));
        info!("User {} was promoted to {} in guild {}", user_key, job, guild_key);
    }
    ctx.say(reply).await?;

    sync_member_tiers(ctx.http(), &settings.rules, guild, author, &profile).await;
    Ok(())
}

/// Lists the jobs and where you stand.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn jobs(ctx: Context<'_>) -> Result<(), Error> {
    let guild = guild_of(ctx)?;
    let settings = ctx.data().config.get();
    let rules = &settings.rules;
    let messages = &ctx.data().messages;

    if rules.jobs.is_empty() {
        ctx.say(messages.text("jobs-empty")).await?;
        return Ok(());
    }

    let (guild_key, user_key) = profile_key(guild, ctx.author().id);
    let profile = ctx.data().store.get(guild_key, user_key);

    let description = rules
        .jobs
        .iter()
        .map(|job| {
            messages.get(
                "jobs-entry",
                fluent_args!["title" => job.title.clone(), "range" => works_range(job), "pay" => job.pay].as_ref(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut embed = serenity::CreateEmbed::new()
        .title(messages.text("jobs-title"))
        .description(description)
        .colour(serenity::Colour::DARK_GREEN);
    if let Some((job, position)) = rules.job_position(&profile) {
        embed = embed.footer(serenity::CreateEmbedFooter::new(messages.get(
            "jobs-current",
            fluent_args![
                "title" => job.title.clone(),
                "sub_tier" => position.to_string(),
                "works" => profile.successful_works,
            ]
            .as_ref(),
        )));
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildrank_common::test_utils::{config_fixtures, mock_timestamp};
    use guildrank_config::{ConfigLoader, LoadedConfig};

    fn loaded() -> LoadedConfig {
        LoadedConfig::new(ConfigLoader::parse(config_fixtures::full_config_yaml()).unwrap()).unwrap()
    }

    #[test]
    fn test_shift_pays_current_job() {
        let loaded = loaded();
        let mut profile = Profile::default();
        let now = mock_timestamp(2024, 5, 1, 9, 0, 0);

        let outcome = perform_work(&mut profile, &loaded.rules, &loaded.config.economy, now).unwrap();

        assert_eq!(outcome.pay, 50);
        assert_eq!(outcome.position, Some(("Intern".to_string(), "2/10".to_string())));
        assert_eq!(outcome.promoted_to, None);
        assert_eq!(profile.successful_works, 1);
        assert_eq!(profile.coins, 50);
    }

    #[test]
    fn test_tenth_shift_promotes() {
        let loaded = loaded();
        let mut profile = Profile {
            successful_works: 9,
            ..Profile::default()
        };

        let outcome = perform_work(&mut profile, &loaded.rules, &loaded.config.economy, mock_timestamp(2024, 5, 1, 9, 0, 0)).unwrap();

        // Paid at the old job, promoted afterwards
        assert_eq!(outcome.pay, 50);
        assert_eq!(outcome.promoted_to.as_deref(), Some("Junior"));
        assert_eq!(outcome.position, Some(("Junior".to_string(), "1/10".to_string())));
    }

    #[test]
    fn test_shift_on_cooldown() {
        let loaded = loaded();
        let mut profile = Profile::default();
        let economy = &loaded.config.economy;
        perform_work(&mut profile, &loaded.rules, economy, mock_timestamp(2024, 5, 1, 9, 0, 0)).unwrap();

        let error = perform_work(&mut profile, &loaded.rules, economy, mock_timestamp(2024, 5, 1, 9, 30, 0)).unwrap_err();

        assert!(matches!(error, CommandError::Cooldown(remaining) if remaining == chrono::Duration::minutes(15)));
        assert_eq!(profile.successful_works, 1);
    }

    #[test]
    fn test_shift_without_jobs() {
        let mut profile = Profile::default();
        let outcome = perform_work(
            &mut profile,
            &ProgressionRules::default(),
            &EconomyConfig::default(),
            mock_timestamp(2024, 5, 1, 9, 0, 0),
        )
        .unwrap();

        assert_eq!(outcome.pay, 0);
        assert_eq!(outcome.position, None);
        assert_eq!(outcome.next_job, None);
        assert_eq!(profile.successful_works, 1);
    }

    #[test]
    fn test_shift_below_first_job() {
        let loaded = loaded();
        let mut config = loaded.config.clone();
        for job in &mut config.jobs {
            job.min_works += 5;
            job.max_works = job.max_works.map(|max| max + 5);
        }
        let rules = LoadedConfig::new(config).unwrap().rules;
        let mut profile = Profile::default();

        let outcome = perform_work(&mut profile, &rules, &loaded.config.economy, mock_timestamp(2024, 5, 1, 9, 0, 0)).unwrap();

        assert_eq!(outcome.pay, 0);
        assert_eq!(outcome.position, None);
        assert_eq!(outcome.next_job, Some(("Intern".to_string(), 4)));
    }

    #[test]
    fn test_works_range() {
        let rules = loaded().rules;
        let ranges: Vec<String> = rules.jobs.iter().map(works_range).collect();
        assert_eq!(ranges, vec!["0-9", "10-19", "20+"]);
    }
}
