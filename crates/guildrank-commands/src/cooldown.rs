//! In-memory cooldowns for actions that are not persisted, such as message XP.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use guildrank_common::{GuildId, UserId};
use std::time::{Duration, Instant};
use tracing::debug;

/// Rate-limited action, per member of a guild.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CooldownKey {
    /// XP for chatting.
    MessageXp(GuildId, UserId),
}

/// Manager for handling cooldowns.
#[derive(Debug, Default)]
pub struct CooldownManager {
    /// Last time each key was acquired.
    cooldowns: DashMap<CooldownKey, Instant>,
}

impl CooldownManager {
    /// Create a new cooldown manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key` if its cooldown has elapsed, returning the time left otherwise.
    ///
    /// Check and claim happen under one entry lock, so two messages racing
    /// for the same member cannot both pass.
    pub fn try_acquire(&self, key: CooldownKey, period: Duration) -> Result<(), Duration> {
        self.try_acquire_at(key, period, Instant::now())
    }

    fn try_acquire_at(&self, key: CooldownKey, period: Duration, now: Instant) -> Result<(), Duration> {
        match self.cooldowns.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(now);
                Ok(())
            }
            Entry::Occupied(mut entry) => {
                let elapsed = now.saturating_duration_since(*entry.get());
                if elapsed < period {
                    return Err(period - elapsed);
                }
                entry.insert(now);
                Ok(())
            }
        }
    }

    /// Drops entries older than `max_age`.
    pub fn cleanup_expired(&self, max_age: Duration) {
        let before = self.cooldowns.len();
        let now = Instant::now();
        self.cooldowns
            .retain(|_, last_used| now.saturating_duration_since(*last_used) < max_age);
        debug!("Cleaned up {} expired cooldowns", before - self.cooldowns.len());
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.cooldowns.len()
    }

    /// Whether no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.cooldowns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(user: u64) -> CooldownKey {
        CooldownKey::MessageXp(GuildId(1), UserId(user))
    }

    #[test]
    fn test_first_use_passes() {
        let manager = CooldownManager::new();
        assert!(manager.try_acquire(key(1), Duration::from_secs(60)).is_ok());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_second_use_is_blocked() {
        let manager = CooldownManager::new();
        let start = Instant::now();
        let period = Duration::from_secs(60);

        manager.try_acquire_at(key(1), period, start).unwrap();
        let remaining = manager
            .try_acquire_at(key(1), period, start + Duration::from_secs(20))
            .unwrap_err();
        assert_eq!(remaining, Duration::from_secs(40));

        // A blocked attempt does not restart the window
        assert!(manager
            .try_acquire_at(key(1), period, start + Duration::from_secs(60))
            .is_ok());
    }

    #[test]
    fn test_keys_are_independent() {
        let manager = CooldownManager::new();
        let period = Duration::from_secs(60);

        manager.try_acquire(key(1), period).unwrap();
        assert!(manager.try_acquire(key(2), period).is_ok());
        assert!(manager
            .try_acquire(CooldownKey::MessageXp(GuildId(2), UserId(1)), period)
            .is_ok());
    }

    #[test]
    fn test_cleanup_expired() {
        let manager = CooldownManager::new();
        manager.try_acquire(key(1), Duration::from_secs(60)).unwrap();

        manager.cleanup_expired(Duration::from_secs(3600));
        assert_eq!(manager.len(), 1);

        manager.cleanup_expired(Duration::ZERO);
        assert!(manager.is_empty());
    }
}
