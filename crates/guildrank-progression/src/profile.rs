//! Per-member accumulators: XP and level, coins, cookies and successful works.

use crate::curve::{GrowthCurve, LevelProgress};
use crate::error::{ProgressionError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the bot tracks for one member of one guild.
///
/// Counters never go below zero: deductions saturate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Current level.
    pub level: u32,
    /// XP inside the current level.
    pub xp: u64,
    /// Coin balance.
    pub coins: u64,
    /// Cookies received from other members.
    pub cookies: u64,
    /// Completed `/work` shifts.
    pub successful_works: u64,
    /// Last `/daily` claim.
    pub last_daily: Option<DateTime<Utc>>,
    /// Last `/work` shift.
    pub last_work: Option<DateTime<Utc>>,
    /// Last cookie this member gave away.
    pub last_cookie_given: Option<DateTime<Utc>>,
}

impl Profile {
    /// Level and in-level XP.
    pub const fn progress(&self) -> LevelProgress {
        LevelProgress::new(self.level, self.xp)
    }

    fn set_progress(&mut self, progress: LevelProgress) {
        self.level = progress.level;
        self.xp = progress.xp;
    }

    /// Awards XP and returns the number of levels gained.
    ///
    /// The profile is left untouched when the curve rejects the delta.
    pub fn award_xp(&mut self, curve: &GrowthCurve, amount: i64) -> Result<u32> {
        let advance = curve.advance(self.progress(), amount)?;
        self.set_progress(advance.progress);
        Ok(advance.levels_gained)
    }

    /// Removes XP and returns the number of levels lost.
    pub fn deduct_xp(&mut self, curve: &GrowthCurve, amount: i64) -> Result<u32> {
        let retreat = curve.retreat(self.progress(), amount)?;
        self.set_progress(retreat.progress);
        Ok(retreat.levels_lost)
    }

    /// Jumps straight to `level` with no in-level XP.
    pub fn set_level(&mut self, curve: &GrowthCurve, level: i64) -> Result<()> {
        curve.requirement_at(level)?;
        let level = u32::try_from(level).map_err(|_| ProgressionError::argument("level out of range"))?;
        self.set_progress(LevelProgress::new(level, 0));
        Ok(())
    }

    /// Lifetime XP under `curve`.
    pub fn total_xp(&self, curve: &GrowthCurve) -> u64 {
        curve.total_xp(self.progress())
    }

    /// Adds coins.
    pub fn award_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Removes up to `amount` coins and returns how many were actually removed.
    pub fn deduct_coins(&mut self, amount: u64) -> u64 {
        let removed = amount.min(self.coins);
        self.coins -= removed;
        removed
    }

    /// Adds cookies.
    pub fn award_cookies(&mut self, amount: u64) {
        self.cookies = self.cookies.saturating_add(amount);
    }

    /// Removes up to `amount` cookies and returns how many were actually removed.
    pub fn deduct_cookies(&mut self, amount: u64) -> u64 {
        let removed = amount.min(self.cookies);
        self.cookies -= removed;
        removed
    }

    /// Records a completed work shift paying `pay` coins.
    pub fn record_work(&mut self, pay: u64, at: DateTime<Utc>) {
        self.successful_works = self.successful_works.saturating_add(1);
        self.award_coins(pay);
        self.last_work = Some(at);
    }
}
