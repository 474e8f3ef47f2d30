//! Applying role diffs through a guild membership backend.

use crate::roles::RoleDiff;
use async_trait::async_trait;
use guildrank_common::{GuildId, RoleId, UserId};
use tracing::{debug, warn};

/// Error returned by a membership backend.
pub type MembershipError = Box<dyn std::error::Error + Send + Sync>;

/// Adds and removes guild roles for a member.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleMembership: Send + Sync {
    /// Grants `role` to `user` in `guild`.
    async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), MembershipError>;

    /// Revokes `role` from `user` in `guild`.
    async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), MembershipError>;
}

/// What happened while applying one or more diffs.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Roles granted.
    pub added: Vec<RoleId>,
    /// Roles revoked.
    pub removed: Vec<RoleId>,
    /// Roles whose change failed, with the backend's message.
    pub failed: Vec<(RoleId, String)>,
}

impl SyncReport {
    /// Whether every requested change went through.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Folds another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
        self.failed.extend(other.failed);
    }
}

/// Issues every change in `diff`, continuing past individual failures.
///
/// Removals run before the addition so a member never briefly holds two
/// tier roles from the same table.
pub async fn apply_role_diff<M>(membership: &M, guild: GuildId, user: UserId, diff: &RoleDiff) -> SyncReport
where
    M: RoleMembership + ?Sized,
{
    let mut report = SyncReport::default();

    for &role in &diff.to_remove {
        match membership.remove_role(guild, user, role).await {
            Ok(()) => {
                debug!("Removed role {} from user {} in guild {}", role, user, guild);
                report.removed.push(role);
            }
            Err(e) => {
                warn!("Failed to remove role {} from user {} in guild {}: {}", role, user, guild, e);
                report.failed.push((role, e.to_string()));
            }
        }
    }

    if let Some(role) = diff.to_add {
        match membership.add_role(guild, user, role).await {
            Ok(()) => {
                debug!("Added role {} to user {} in guild {}", role, user, guild);
                report.added.push(role);
            }
            Err(e) => {
                warn!("Failed to add role {} to user {} in guild {}: {}", role, user, guild, e);
                report.failed.push((role, e.to_string()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use mockall::Sequence;

    const GUILD: GuildId = GuildId(1);
    const USER: UserId = UserId(2);

    fn diff(to_add: Option<u64>, to_remove: &[u64]) -> RoleDiff {
        RoleDiff {
            to_add: to_add.map(RoleId),
            to_remove: to_remove.iter().copied().map(RoleId).collect(),
        }
    }

    #[tokio::test]
    async fn test_removals_run_before_addition() {
        let mut membership = MockRoleMembership::new();
        let mut seq = Sequence::new();
        membership
            .expect_remove_role()
            .with(eq(GUILD), eq(USER), eq(RoleId(10)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        membership
            .expect_add_role()
            .with(eq(GUILD), eq(USER), eq(RoleId(20)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let report = apply_role_diff(&membership, GUILD, USER, &diff(Some(20), &[10])).await;
        assert!(report.is_clean());
        assert_eq!(report.added, vec![RoleId(20)]);
        assert_eq!(report.removed, vec![RoleId(10)]);
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_the_batch() {
        let mut membership = MockRoleMembership::new();
        membership
            .expect_remove_role()
            .with(eq(GUILD), eq(USER), eq(RoleId(10)))
            .returning(|_, _, _| Err("Missing Permissions".into()));
        membership
            .expect_remove_role()
            .with(eq(GUILD), eq(USER), eq(RoleId(11)))
            .returning(|_, _, _| Ok(()));
        membership
            .expect_add_role()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let report = apply_role_diff(&membership, GUILD, USER, &diff(Some(20), &[10, 11])).await;
        assert!(!report.is_clean());
        assert_eq!(report.failed, vec![(RoleId(10), "Missing Permissions".to_string())]);
        assert_eq!(report.removed, vec![RoleId(11)]);
        assert_eq!(report.added, vec![RoleId(20)]);
    }

    #[tokio::test]
    async fn test_empty_diff_makes_no_calls() {
        let membership = MockRoleMembership::new();
        let report = apply_role_diff(&membership, GUILD, USER, &RoleDiff::default()).await;
        assert_eq!(report, SyncReport::default());
    }

    #[test]
    fn test_merge_reports() {
        let mut report = SyncReport {
            added: vec![RoleId(1)],
            ..SyncReport::default()
        };
        report.merge(SyncReport {
            removed: vec![RoleId(2)],
            failed: vec![(RoleId(3), "denied".to_string())],
            ..SyncReport::default()
        });
        assert_eq!(report.added, vec![RoleId(1)]);
        assert_eq!(report.removed, vec![RoleId(2)]);
        assert_eq!(report.failed.len(), 1);
    }
}
