//! Threshold-ordered tier tables and exclusive tier selection.

use crate::error::{ProgressionError, Result};
use guildrank_common::RoleId;
use serde::{Deserialize, Serialize};

/// An entry that can live in a [`TierTable`].
pub trait Tiered {
    /// Minimum accumulated value that qualifies for this tier.
    fn threshold(&self) -> u64;

    /// Guild role representing this tier.
    fn role_id(&self) -> RoleId;

    /// Human readable tier name.
    fn label(&self) -> &str;
}

/// A named rank unlocked at a threshold, used for level and cookie roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTier {
    /// Level or cookie count at which the rank is reached.
    pub threshold: u64,
    /// Display name of the rank.
    pub name: String,
    /// Role granted while this rank is current.
    pub role_id: RoleId,
}

impl RankTier {
    /// Creates a new rank tier.
    pub fn new(threshold: u64, name: impl Into<String>, role_id: RoleId) -> Self {
        Self {
            threshold,
            name: name.into(),
            role_id,
        }
    }
}

impl Tiered for RankTier {
    fn threshold(&self) -> u64 {
        self.threshold
    }

    fn role_id(&self) -> RoleId {
        self.role_id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Tiers sorted by strictly increasing threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable<T> {
    entries: Vec<T>,
}

impl<T> Default for TierTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Tiered> TierTable<T> {
    /// Builds a table, rejecting duplicate or descending thresholds.
    pub fn new(entries: Vec<T>) -> Result<Self> {
        for pair in entries.windows(2) {
            let (previous, next) = (pair[0].threshold(), pair[1].threshold());
            if previous == next {
                return Err(ProgressionError::configuration(format!(
                    "duplicate tier threshold {next} ('{}' and '{}')",
                    pair[0].label(),
                    pair[1].label()
                )));
            }
            if previous > next {
                return Err(ProgressionError::configuration(format!(
                    "tier thresholds must be ascending, found {previous} before {next}"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The tier with the greatest threshold not exceeding `value`.
    pub fn select(&self, value: u64) -> Option<&T> {
        let reached = self.entries.partition_point(|tier| tier.threshold() <= value);
        reached.checked_sub(1).map(|index| &self.entries[index])
    }

    /// The first tier strictly above `value`, if any.
    pub fn next_above(&self, value: u64) -> Option<&T> {
        let reached = self.entries.partition_point(|tier| tier.threshold() <= value);
        self.entries.get(reached)
    }

    /// Every role the table can grant.
    pub fn role_ids(&self) -> impl Iterator<Item = RoleId> + '_ {
        self.entries.iter().map(Tiered::role_id)
    }
}

impl<T> TierTable<T> {
    /// Iterates tiers in ascending threshold order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no tiers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a TierTable<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
