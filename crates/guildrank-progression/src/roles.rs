//! Batch role diffs for exclusive tier roles.
//!
//! A diff is computed once from the member's current roles and applied as a
//! whole. Toggling roles one at a time while walking the table is what lets
//! two passes undo each other.

use crate::tier::{TierTable, Tiered};
use guildrank_common::RoleId;
use std::collections::{BTreeSet, HashSet};

/// Role changes needed to make a member hold exactly the selected tier role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDiff {
    /// Selected tier role, when the member does not hold it yet.
    pub to_add: Option<RoleId>,
    /// Held tier roles from the same table that are not the selected one.
    pub to_remove: BTreeSet<RoleId>,
}

impl RoleDiff {
    /// Whether the member already matches the selection.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_none() && self.to_remove.is_empty()
    }

    /// Applies the diff to a local view of held roles.
    pub fn apply_to(&self, held: &mut HashSet<RoleId>) {
        for role in &self.to_remove {
            held.remove(role);
        }
        if let Some(role) = self.to_add {
            held.insert(role);
        }
    }
}

/// Computes the single batch of changes for one table.
pub fn diff_roles<T: Tiered>(
    table: &TierTable<T>,
    selection: Option<&T>,
    held: &HashSet<RoleId>,
) -> RoleDiff {
    let selected = selection.map(Tiered::role_id);

    let to_remove = table
        .role_ids()
        .filter(|role| Some(*role) != selected && held.contains(role))
        .collect();

    let to_add = selected.filter(|role| !held.contains(role));

    RoleDiff { to_add, to_remove }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::RankTier;

    fn table() -> TierTable<RankTier> {
        TierTable::new(vec![
            RankTier::new(100, "a", RoleId(1)),
            RankTier::new(500, "b", RoleId(2)),
            RankTier::new(1000, "c", RoleId(3)),
        ])
        .unwrap()
    }

    #[test]
    fn test_diff_replaces_stale_roles() {
        let table = table();
        let held: HashSet<_> = [RoleId(1), RoleId(3)].into_iter().collect();
        let diff = diff_roles(&table, table.select(750), &held);

        assert_eq!(diff.to_add, Some(RoleId(2)));
        assert_eq!(diff.to_remove, [RoleId(1), RoleId(3)].into_iter().collect());
    }

    #[test]
    fn test_diff_keeps_unrelated_roles() {
        let table = table();
        let held: HashSet<_> = [RoleId(2), RoleId(99)].into_iter().collect();
        let diff = diff_roles(&table, table.select(600), &held);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_diff_with_no_selection_strips_table_roles() {
        let table = table();
        let held: HashSet<_> = [RoleId(1), RoleId(99)].into_iter().collect();
        let diff = diff_roles(&table, table.select(10), &held);

        assert_eq!(diff.to_add, None);
        assert_eq!(diff.to_remove, [RoleId(1)].into_iter().collect());
    }

    #[test]
    fn test_shared_role_is_never_removed_when_selected() {
        let table = TierTable::new(vec![
            RankTier::new(1, "low", RoleId(7)),
            RankTier::new(2, "high", RoleId(7)),
        ])
        .unwrap();
        let held: HashSet<_> = [RoleId(7)].into_iter().collect();
        assert!(diff_roles(&table, table.select(2), &held).is_empty());
    }

    #[test]
    fn test_apply_then_rediff_is_empty() {
        let table = table();
        let mut held: HashSet<_> = [RoleId(1), RoleId(3), RoleId(42)].into_iter().collect();
        let diff = diff_roles(&table, table.select(500), &held);
        diff.apply_to(&mut held);

        assert!(diff_roles(&table, table.select(500), &held).is_empty());
        assert!(held.contains(&RoleId(42)));
    }
}
