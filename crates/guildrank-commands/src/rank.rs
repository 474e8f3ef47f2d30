//! Rank card and leaderboard.

use crate::error::CommandError;
use crate::framework::{guild_of, profile_key, Context, Error};
use guildrank_common::{format_number, progress_bar, RoleId};
use guildrank_i18n::{fluent_args, Messages};
use guildrank_progression::{Profile, ProgressionRules};
use poise::serenity_prelude as serenity;

/// Rows shown on `/leaderboard`.
pub const LEADERBOARD_SIZE: usize = 10;

const PROGRESS_BAR_WIDTH: usize = 12;

/// What a rank card shows, independent of Discord rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankCard {
    /// Current level.
    pub level: u32,
    /// XP inside the level.
    pub xp: u64,
    /// XP needed for the next level.
    pub required: u64,
    /// Coin balance.
    pub coins: u64,
    /// Cookie count.
    pub cookies: u64,
    /// Current level role.
    pub level_role: Option<RoleId>,
    /// Current cookie role.
    pub cookie_role: Option<RoleId>,
    /// Job title and sub-tier, e.g. `("Junior", "5/10")`.
    pub job: Option<(String, String)>,
    /// Next level role name and the level that unlocks it.
    pub next_level_role: Option<(String, u64)>,
}

impl RankCard {
    /// Collects the card for `profile`.
    pub fn build(rules: &ProgressionRules, profile: &Profile) -> Self {
        Self {
            level: profile.level,
            xp: profile.xp,
            required: rules.curve.requirement(profile.level),
            coins: profile.coins,
            cookies: profile.cookies,
            level_role: rules.level_tier(profile).map(|tier| tier.role_id),
            cookie_role: rules.cookie_tier(profile).map(|tier| tier.role_id),
            job: rules
                .job_position(profile)
                .map(|(job, position)| (job.title.clone(), position.to_string())),
            next_level_role: rules
                .level_roles
                .next_above(u64::from(profile.level))
                .map(|tier| (tier.name.clone(), tier.threshold)),
        }
    }

    fn embed(&self, messages: &Messages, user: &serenity::User) -> serenity::CreateEmbed {
        let none = messages.text("rank-none");
        let role = |role: Option<RoleId>| role.map_or_else(|| none.clone(), RoleId::mention);
        let job = self
            .job
            .as_ref()
            .map_or_else(|| none.clone(), |(title, position)| format!("{title} ({position})"));

        let mut embed = serenity::CreateEmbed::new()
            .title(messages.get("rank-title", fluent_args!["user" => user.name.clone()].as_ref()))
            .thumbnail(user.face())
            .colour(serenity::Colour::BLURPLE)
            .field(messages.text("rank-level"), self.level.to_string(), true)
            .field(messages.text("rank-coins"), format_number(self.coins), true)
            .field(messages.text("rank-cookies"), format_number(self.cookies), true)
            .field(
                messages.text("rank-progress"),
                format!(
                    "{} {} / {}",
                    progress_bar(self.xp, self.required, PROGRESS_BAR_WIDTH),
                    format_number(self.xp),
                    format_number(self.required)
                ),
                false,
            )
            .field(messages.text("rank-level-role"), role(self.level_role), true)
            .field(messages.text("rank-cookie-role"), role(self.cookie_role), true)
            .field(messages.text("rank-job"), job, true);

        if let Some((name, threshold)) = &self.next_level_role {
            embed = embed.footer(serenity::CreateEmbedFooter::new(messages.get(
                "rank-next-role",
                fluent_args!["role" => name.clone(), "threshold" => *threshold].as_ref(),
            )));
        }
        embed
    }
}

/// Shows a member's level, balances and roles.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn rank(
    ctx: Context<'_>,
    #[description = "Member to look up"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let guild = guild_of(ctx)?;
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    if target.bot {
        return Err(CommandError::BotTarget.into());
    }

    let settings = ctx.data().config.get();
    let (guild_key, user_key) = profile_key(guild, target.id);
    let profile = ctx.data().store.get(guild_key, user_key);
    let card = RankCard::build(&settings.rules, &profile);

    ctx.send(poise::CreateReply::default().embed(card.embed(&ctx.data().messages, target)))
        .await?;
    Ok(())
}

/// Shows the members with the most XP.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn leaderboard(ctx: Context<'_>) -> Result<(), Error> {
    let guild = guild_of(ctx)?;
    let settings = ctx.data().config.get();
    let curve = &settings.rules.curve;
    let messages = &ctx.data().messages;

    let board = ctx
        .data()
        .store
        .leaderboard(profile_key(guild, ctx.author().id).0, curve, LEADERBOARD_SIZE);

    let description = if board.is_empty() {
        messages.text("leaderboard-empty")
    } else {
        board
            .iter()
            .enumerate()
            .map(|(index, (user, profile))| {
                messages.get(
                    "leaderboard-entry",
                    fluent_args![
                        "position" => index + 1,
                        "user" => user.mention(),
                        "level" => profile.level,
                        "xp" => format_number(profile.total_xp(curve)),
                    ]
                    .as_ref(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = serenity::CreateEmbed::new()
        .title(messages.text("leaderboard-title"))
        .description(description)
        .colour(serenity::Colour::GOLD);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
