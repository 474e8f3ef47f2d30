//! Tier role synchronization against Discord.

use async_trait::async_trait;
use guildrank_common::{GuildId, RoleId, UserId};
use guildrank_progression::{apply_role_diff, MembershipError, Profile, ProgressionRules, RoleMembership, SyncReport};
use poise::serenity_prelude as serenity;
use std::collections::HashSet;
use std::num::NonZeroU64;
use tracing::{debug, warn};

/// Audit log reason attached to every role change.
const AUDIT_REASON: &str = "guildrank tier sync";

/// [`RoleMembership`] backed by the Discord HTTP API.
pub struct DiscordRoles<'a> {
    http: &'a serenity::Http,
}

impl<'a> DiscordRoles<'a> {
    /// Wraps an HTTP client.
    pub const fn new(http: &'a serenity::Http) -> Self {
        Self { http }
    }
}

pub(crate) fn snowflake<T: From<NonZeroU64>>(id: u64) -> Result<T, MembershipError> {
    NonZeroU64::new(id)
        .map(T::from)
        .ok_or_else(|| "snowflake id cannot be zero".into())
}

#[async_trait]
impl RoleMembership for DiscordRoles<'_> {
    async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), MembershipError> {
        self.http
            .add_member_role(
                snowflake(guild.0)?,
                snowflake(user.0)?,
                snowflake(role.0)?,
                Some(AUDIT_REASON),
            )
            .await?;
        Ok(())
    }

    async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), MembershipError> {
        self.http
            .remove_member_role(
                snowflake(guild.0)?,
                snowflake(user.0)?,
                snowflake(role.0)?,
                Some(AUDIT_REASON),
            )
            .await?;
        Ok(())
    }
}

/// Brings a member's tier roles in line with `profile` on every ladder.
pub async fn sync_tiers<M>(
    membership: &M,
    rules: &ProgressionRules,
    guild: GuildId,
    user: UserId,
    profile: &Profile,
    held: &HashSet<RoleId>,
) -> SyncReport
where
    M: RoleMembership + ?Sized,
{
    let mut report = SyncReport::default();
    for (ladder, diff) in rules.plan_role_sync(profile, held) {
        debug!("Syncing {} for user {} in guild {}: {:?}", ladder, user, guild, diff);
        report.merge(apply_role_diff(membership, guild, user, &diff).await);
    }
    report
}

/// Fetches the member's roles and syncs them.
///
/// Failures are logged; the caller's command still succeeds.
pub async fn sync_member_tiers(
    http: &serenity::Http,
    rules: &ProgressionRules,
    guild: serenity::GuildId,
    user: serenity::UserId,
    profile: &Profile,
) -> SyncReport {
    let member = match http.get_member(guild, user).await {
        Ok(member) => member,
        Err(e) => {
            warn!("Skipping role sync, could not fetch member {} in guild {}: {}", user, guild, e);
            return SyncReport::default();
        }
    };

    let held: HashSet<RoleId> = member.roles.iter().map(|role| RoleId(role.get())).collect();
    let report = sync_tiers(
        &DiscordRoles::new(http),
        rules,
        GuildId(guild.get()),
        UserId(user.get()),
        profile,
        &held,
    )
    .await;

    if !report.is_clean() {
        warn!(
            "Role sync for user {} in guild {} finished with {} failures",
            user,
            guild,
            report.failed.len()
        );
    }
    report
}
