//! XP growth curve and level transitions.
//!
//! The requirement to advance from `level` to `level + 1` is
//! `floor(base * (level + 1) ^ exponent)`. One curve is shared by every
//! caller that awards or removes XP.

use crate::error::{ProgressionError, Result};

/// Highest level the curve is guaranteed to evaluate exactly.
pub const MAX_SUPPORTED_LEVEL: u32 = 10_000;

/// Largest requirement allowed at [`MAX_SUPPORTED_LEVEL`]. Integers up to
/// 2^53 are exact in `f64`.
const MAX_EXACT_REQUIREMENT: f64 = 9_007_199_254_740_992.0;

/// A `(level, xp)` pair, where `xp` is progress inside the current level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LevelProgress {
    /// Current level, starting at 0.
    pub level: u32,
    /// XP accumulated towards the next level.
    pub xp: u64,
}

impl LevelProgress {
    /// Creates a new progress pair.
    pub const fn new(level: u32, xp: u64) -> Self {
        Self { level, xp }
    }
}

/// Outcome of [`GrowthCurve::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// Resulting progress, with `xp < requirement(level)`.
    pub progress: LevelProgress,
    /// Number of level boundaries crossed.
    pub levels_gained: u32,
}

/// Outcome of [`GrowthCurve::retreat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retreat {
    /// Resulting progress.
    pub progress: LevelProgress,
    /// Number of levels dropped.
    pub levels_lost: u32,
}

/// Power-law XP curve parameterized by `(base, exponent)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthCurve {
    base: u64,
    exponent: f64,
}

impl Default for GrowthCurve {
    fn default() -> Self {
        Self {
            base: 100,
            exponent: 1.5,
        }
    }
}

impl GrowthCurve {
    /// Creates a validated curve.
    ///
    /// The exponent must be at least 1 so the floored requirement grows by at
    /// least `base` per level, and the requirement at
    /// [`MAX_SUPPORTED_LEVEL`] must stay exactly representable.
    pub fn new(base: u64, exponent: f64) -> Result<Self> {
        if base == 0 {
            return Err(ProgressionError::configuration(
                "growth curve base must be at least 1",
            ));
        }
        if !exponent.is_finite() || exponent < 1.0 {
            return Err(ProgressionError::configuration(format!(
                "growth curve exponent must be a finite number >= 1.0, got {exponent}"
            )));
        }

        let curve = Self { base, exponent };
        if curve.raw(MAX_SUPPORTED_LEVEL) > MAX_EXACT_REQUIREMENT {
            return Err(ProgressionError::configuration(format!(
                "growth curve (base {base}, exponent {exponent}) overflows before level {MAX_SUPPORTED_LEVEL}"
            )));
        }
        Ok(curve)
    }

    /// Base requirement at level 0.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Growth exponent.
    pub const fn exponent(&self) -> f64 {
        self.exponent
    }

    #[allow(clippy::cast_precision_loss)]
    fn raw(&self, level: u32) -> f64 {
        self.base as f64 * (f64::from(level) + 1.0).powf(self.exponent)
    }

    /// XP needed to advance from `level` to `level + 1`.
    ///
    /// Strictly increasing in `level` up to [`MAX_SUPPORTED_LEVEL`]; beyond
    /// that the value saturates at `u64::MAX`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn requirement(&self, level: u32) -> u64 {
        // Float-to-int `as` saturates instead of wrapping.
        self.raw(level).floor() as u64
    }

    /// [`requirement`](Self::requirement) for untrusted input.
    pub fn requirement_at(&self, level: i64) -> Result<u64> {
        Ok(self.requirement(checked_level(level)?))
    }

    /// Applies an XP award and resolves every level boundary it crosses.
    ///
    /// Levels stop at [`MAX_SUPPORTED_LEVEL`]; XP beyond that level's
    /// requirement is dropped, so `xp < requirement(level)` still holds.
    pub fn advance(&self, progress: LevelProgress, delta: i64) -> Result<Advance> {
        let delta = checked_delta(delta)?;
        let mut level = progress.level;
        let mut xp = progress.xp.saturating_add(delta);
        let mut levels_gained = 0;

        loop {
            let needed = self.requirement(level);
            if level >= MAX_SUPPORTED_LEVEL {
                xp = xp.min(needed.saturating_sub(1));
                break;
            }
            if xp < needed {
                break;
            }
            xp -= needed;
            level += 1;
            levels_gained += 1;
        }

        Ok(Advance {
            progress: LevelProgress { level, xp },
            levels_gained,
        })
    }

    /// Removes XP, clamping at zero, and drops levels while the remaining XP
    /// sits below the requirement of the level beneath.
    pub fn retreat(&self, progress: LevelProgress, delta: i64) -> Result<Retreat> {
        let delta = checked_delta(delta)?;
        let xp = progress.xp.saturating_sub(delta);
        let mut level = progress.level;
        let mut levels_lost = 0;

        while level > 0 && xp < self.requirement(level - 1) {
            level -= 1;
            levels_lost += 1;
        }

        Ok(Retreat {
            progress: LevelProgress { level, xp },
            levels_lost,
        })
    }

    /// Lifetime XP represented by `progress`, used for leaderboard ordering.
    pub fn total_xp(&self, progress: LevelProgress) -> u64 {
        (0..progress.level)
            .map(|level| self.requirement(level))
            .fold(progress.xp, u64::saturating_add)
    }
}

fn checked_level(level: i64) -> Result<u32> {
    u32::try_from(level)
        .map_err(|_| ProgressionError::argument(format!("level must be between 0 and {}, got {level}", u32::MAX)))
}

fn checked_delta(delta: i64) -> Result<u64> {
    u64::try_from(delta)
        .map_err(|_| ProgressionError::argument(format!("xp delta must not be negative, got {delta}")))
}
