//! Integration tests for guildrank-progression crate.
//!
//! These tests exercise the engine through its public API: the worked
//! leveling, cookie, job and role scenarios plus property tests for curve
//! monotonicity, advance/retreat bounds, exclusivity and diff idempotence.

use guildrank_common::test_utils::{discord_fixtures, property_testing};
use guildrank_common::RoleId;
use guildrank_common::{GuildId, UserId};
use guildrank_progression::{
    apply_role_diff, diff_roles, sub_tier, GrowthCurve, LevelProgress, MembershipError, RankTier,
    RoleMembership, Span, TierTable, MAX_SUPPORTED_LEVEL,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Mutex;

fn default_curve() -> GrowthCurve {
    GrowthCurve::new(100, 1.5).unwrap()
}

fn table_from(thresholds: &[u64]) -> TierTable<RankTier> {
    let roles = discord_fixtures::test_role_ids(thresholds.len());
    TierTable::new(
        thresholds
            .iter()
            .zip(roles)
            .map(|(&threshold, role)| RankTier::new(threshold, format!("tier-{threshold}"), role))
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_leveling_scenario() {
    let curve = default_curve();
    assert_eq!(curve.requirement(0), 100);
    assert_eq!(curve.requirement(1), 282);

    let result = curve.advance(LevelProgress::new(0, 80), 50).unwrap();
    assert_eq!(result.progress.level, 1);
    assert_eq!(result.progress.xp, 30);
    assert_eq!(result.levels_gained, 1);
}

#[test]
fn test_cookie_tier_scenario() {
    let table = TierTable::new(vec![
        RankTier::new(100, "a", RoleId(1)),
        RankTier::new(500, "b", RoleId(2)),
        RankTier::new(1000, "c", RoleId(3)),
    ])
    .unwrap();

    assert_eq!(table.select(750).map(|t| t.name.as_str()), Some("b"));
    assert_eq!(table.select(50), None);
    assert_eq!(table.select(1000).map(|t| t.name.as_str()), Some("c"));
}

#[test]
fn test_job_sub_tier_scenario() {
    let position = sub_tier(10, Some(19), 14).unwrap();
    assert_eq!(position.ordinal, 5);
    assert_eq!(position.span, Span::Bounded(10));
}

#[test]
fn test_role_diff_scenario() {
    let table = TierTable::new(vec![
        RankTier::new(100, "a", RoleId(1)),
        RankTier::new(500, "b", RoleId(2)),
        RankTier::new(1000, "c", RoleId(3)),
    ])
    .unwrap();
    let selection = table.iter().find(|t| t.name == "b");
    let held: HashSet<_> = [RoleId(1), RoleId(3)].into_iter().collect();

    let diff = diff_roles(&table, selection, &held);
    assert_eq!(diff.to_add, Some(RoleId(2)));
    assert_eq!(diff.to_remove, [RoleId(1), RoleId(3)].into_iter().collect());
}

#[test]
fn test_curve_is_monotonic_up_to_supported_level() {
    let curve = default_curve();
    let mut previous = curve.requirement(0);
    for level in 1..=MAX_SUPPORTED_LEVEL {
        let next = curve.requirement(level);
        assert!(next > previous, "requirement({level}) = {next} <= {previous}");
        previous = next;
    }
}

proptest! {
    #[test]
    fn prop_requirement_strictly_increases(
        level in 0u32..MAX_SUPPORTED_LEVEL,
        base in 1u64..1_000,
        exponent in 1.0f64..2.5,
    ) {
        let curve = GrowthCurve::new(base, exponent).unwrap();
        prop_assert!(curve.requirement(level + 1) > curve.requirement(level));
    }

    #[test]
    fn prop_advance_leaves_xp_below_requirement(
        level in property_testing::level_strategy(),
        seed in 0u64..1_000_000,
        delta in 0i64..5_000_000,
    ) {
        let curve = default_curve();
        let xp = seed % curve.requirement(level);
        let result = curve.advance(LevelProgress::new(level, xp), delta).unwrap();
        prop_assert!(result.progress.xp < curve.requirement(result.progress.level));
        prop_assert_eq!(result.progress.level, level + result.levels_gained);
    }

    #[test]
    fn prop_retreat_after_advance_never_ends_higher(
        level in property_testing::level_strategy(),
        seed in 0u64..1_000_000,
        delta in 0i64..5_000_000,
    ) {
        let curve = default_curve();
        let xp = seed % curve.requirement(level);
        let advanced = curve.advance(LevelProgress::new(level, xp), delta).unwrap();
        let retreated = curve.retreat(advanced.progress, delta).unwrap();
        prop_assert!(retreated.progress.level <= level);
    }

    #[test]
    fn prop_selection_is_exclusive(
        thresholds in property_testing::threshold_strategy(8),
        value in 0u64..120_000,
    ) {
        let table = table_from(&thresholds);
        let matching: Vec<_> = table.iter().filter(|t| t.threshold <= value).collect();
        match table.select(value) {
            None => prop_assert!(matching.is_empty()),
            Some(selected) => {
                prop_assert!(matching.iter().all(|t| t.threshold <= selected.threshold));
                prop_assert!(table.iter().all(|t| t.threshold <= value || t.threshold > selected.threshold));
            }
        }
    }

    #[test]
    fn prop_diff_never_adds_what_it_removes(
        thresholds in property_testing::threshold_strategy(8),
        value in 0u64..120_000,
        held_mask in any::<u8>(),
    ) {
        let table = table_from(&thresholds);
        let held: HashSet<RoleId> = table
            .role_ids()
            .enumerate()
            .filter(|(i, _)| held_mask & (1 << i) != 0)
            .map(|(_, role)| role)
            .collect();

        let diff = diff_roles(&table, table.select(value), &held);
        if let Some(role) = diff.to_add {
            prop_assert!(!diff.to_remove.contains(&role));
        }
    }

    #[test]
    fn prop_diff_is_idempotent(
        thresholds in property_testing::threshold_strategy(8),
        value in 0u64..120_000,
        held_mask in any::<u8>(),
    ) {
        let table = table_from(&thresholds);
        let mut held: HashSet<RoleId> = table
            .role_ids()
            .enumerate()
            .filter(|(i, _)| held_mask & (1 << i) != 0)
            .map(|(_, role)| role)
            .chain(std::iter::once(RoleId(1)))
            .collect();

        let first = diff_roles(&table, table.select(value), &held);
        first.apply_to(&mut held);
        let second = diff_roles(&table, table.select(value), &held);

        prop_assert!(second.is_empty());
        prop_assert!(held.contains(&RoleId(1)));
    }
}

/// Membership backend holding roles in memory.
#[derive(Default)]
struct InMemoryGuild {
    held: Mutex<HashSet<RoleId>>,
}

#[async_trait::async_trait]
impl RoleMembership for InMemoryGuild {
    async fn add_role(&self, _: GuildId, _: UserId, role: RoleId) -> Result<(), MembershipError> {
        self.held.lock().unwrap().insert(role);
        Ok(())
    }

    async fn remove_role(&self, _: GuildId, _: UserId, role: RoleId) -> Result<(), MembershipError> {
        self.held.lock().unwrap().remove(&role);
        Ok(())
    }
}

#[test]
fn test_applied_diff_leaves_one_tier_role() {
    let table = table_from(&[10, 20, 30]);
    let guild = InMemoryGuild::default();
    guild.held.lock().unwrap().extend(table.role_ids());
    guild.held.lock().unwrap().insert(RoleId(1));

    let held = guild.held.lock().unwrap().clone();
    let diff = diff_roles(&table, table.select(25), &held);
    let report = tokio_test::block_on(apply_role_diff(&guild, GuildId(1), UserId(2), &diff));

    assert!(report.is_clean());
    assert_eq!(report.removed.len(), 2);
    let held = guild.held.lock().unwrap();
    let tier_roles: Vec<RoleId> = table.role_ids().filter(|role| held.contains(role)).collect();
    assert_eq!(tier_roles, vec![table.select(25).unwrap().role_id]);
    assert!(held.contains(&RoleId(1)));
}
