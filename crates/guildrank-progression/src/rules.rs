//! The full set of ladders a guild progresses through.

use crate::curve::GrowthCurve;
use crate::error::{ProgressionError, Result};
use crate::job::{job_table, JobTier, SubTier};
use crate::profile::Profile;
use crate::roles::{diff_roles, RoleDiff};
use crate::tier::{RankTier, TierTable};
use guildrank_common::RoleId;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Which accumulator a tier table is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ladder {
    /// `level_roles`, keyed by level.
    Level,
    /// `cookie_roles`, keyed by cookies received.
    Cookie,
    /// `jobs`, keyed by successful works.
    Job,
}

impl Ladder {
    /// Configuration name of the ladder.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level => "level_roles",
            Self::Cookie => "cookie_roles",
            Self::Job => "jobs",
        }
    }
}

impl fmt::Display for Ladder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Growth curve plus every tier table, validated together.
#[derive(Debug, Clone, Default)]
pub struct ProgressionRules {
    /// Shared XP curve.
    pub curve: GrowthCurve,
    /// Roles awarded by level.
    pub level_roles: TierTable<RankTier>,
    /// Roles awarded by cookies received.
    pub cookie_roles: TierTable<RankTier>,
    /// Job ladder awarded by successful works.
    pub jobs: TierTable<JobTier>,
}

impl ProgressionRules {
    /// Validates and assembles the ladders.
    ///
    /// A role may appear in only one ladder, otherwise two ladders would
    /// keep adding and removing it from each other.
    pub fn new(
        curve: GrowthCurve,
        level_roles: Vec<RankTier>,
        cookie_roles: Vec<RankTier>,
        jobs: Vec<JobTier>,
    ) -> Result<Self> {
        let rules = Self {
            curve,
            level_roles: TierTable::new(level_roles).map_err(|e| e.within(Ladder::Level.as_str()))?,
            cookie_roles: TierTable::new(cookie_roles)
                .map_err(|e| e.within(Ladder::Cookie.as_str()))?,
            jobs: job_table(jobs).map_err(|e| e.within(Ladder::Job.as_str()))?,
        };

        let mut owners: HashMap<RoleId, Ladder> = HashMap::new();
        let ladders = [
            (Ladder::Level, rules.level_roles.role_ids().collect::<HashSet<_>>()),
            (Ladder::Cookie, rules.cookie_roles.role_ids().collect()),
            (Ladder::Job, rules.jobs.role_ids().collect()),
        ];
        for (ladder, roles) in ladders {
            for role in roles {
                if let Some(other) = owners.insert(role, ladder) {
                    return Err(ProgressionError::configuration(format!(
                        "role {role} is used by both {other} and {ladder}"
                    )));
                }
            }
        }

        Ok(rules)
    }

    /// Current level rank.
    pub fn level_tier(&self, profile: &Profile) -> Option<&RankTier> {
        self.level_roles.select(u64::from(profile.level))
    }

    /// Current cookie rank.
    pub fn cookie_tier(&self, profile: &Profile) -> Option<&RankTier> {
        self.cookie_roles.select(profile.cookies)
    }

    /// Current job.
    pub fn job(&self, profile: &Profile) -> Option<&JobTier> {
        self.jobs.select(profile.successful_works)
    }

    /// Current job together with the position inside it.
    pub fn job_position(&self, profile: &Profile) -> Option<(&JobTier, SubTier)> {
        let job = self.job(profile)?;
        job.sub_tier(profile.successful_works)
            .ok()
            .map(|position| (job, position))
    }

    /// Non-empty role diffs for every ladder, given the member's held roles.
    pub fn plan_role_sync(&self, profile: &Profile, held: &HashSet<RoleId>) -> Vec<(Ladder, RoleDiff)> {
        [
            (Ladder::Level, diff_roles(&self.level_roles, self.level_tier(profile), held)),
            (Ladder::Cookie, diff_roles(&self.cookie_roles, self.cookie_tier(profile), held)),
            (Ladder::Job, diff_roles(&self.jobs, self.job(profile), held)),
        ]
        .into_iter()
        .filter(|(_, diff)| !diff.is_empty())
        .collect()
    }
}
